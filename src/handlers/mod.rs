pub mod categories;
pub mod common;
pub mod demo;
pub mod products;

use crate::db::DbPool;
use crate::demo::{DemoStore, InMemoryDemoStore};
use crate::events::EventSender;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub categories: Arc<crate::services::CategoryService>,
    pub products: Arc<crate::services::ProductService>,
    pub demo: Arc<dyn DemoStore>,
}

impl AppServices {
    /// Build the service container with the seeded in-memory demo catalog.
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        let categories = Arc::new(crate::services::CategoryService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let products = Arc::new(crate::services::ProductService::new(
            db_pool,
            event_sender,
        ));
        let demo: Arc<dyn DemoStore> = Arc::new(InMemoryDemoStore::with_seed_data());

        Self {
            categories,
            products,
            demo,
        }
    }
}
