//! Self-contained demo catalog held in process memory.
//!
//! This list backs the `/api/products` endpoint only; it shares nothing with
//! the persistent store and is reseeded on every restart.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use utoipa::ToSchema;

/// A record in the demo catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DemoProduct {
    /// Numeric identity, assigned by the store
    #[schema(example = 1)]
    pub id: u64,
    /// Product display name
    #[schema(example = "Laptop")]
    pub name: String,
    /// Product price
    #[schema(example = "1000")]
    pub price: Decimal,
    /// Free-form category label
    #[schema(example = "Electronics")]
    pub category: String,
}

/// Fields to overwrite on an existing demo record; absent fields are kept.
#[derive(Debug, Clone, Default)]
pub struct DemoProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
}

/// Store contract for the demo catalog.
///
/// Handlers depend on this trait rather than on the in-memory list, so tests
/// and alternative backends can be swapped in at wiring time.
#[async_trait]
pub trait DemoStore: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Vec<DemoProduct>;

    async fn get(&self, id: u64) -> Option<DemoProduct>;

    async fn insert(&self, name: String, price: Decimal, category: String) -> DemoProduct;

    /// Overwrites the supplied fields; returns `None` when the id is absent.
    async fn update(&self, id: u64, patch: DemoProductPatch) -> Option<DemoProduct>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: u64) -> bool;
}

/// In-memory `DemoStore` backed by an ordered list.
///
/// Identity comes from a counter that only moves forward, so deleting a
/// record never lets a later insert collide with a surviving id.
pub struct InMemoryDemoStore {
    items: RwLock<Vec<DemoProduct>>,
    next_id: AtomicU64,
}

impl InMemoryDemoStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// The fixture catalog served out of the box.
    pub fn with_seed_data() -> Self {
        let items = vec![
            DemoProduct {
                id: 1,
                name: "Laptop".to_string(),
                price: dec!(1000),
                category: "Electronics".to_string(),
            },
            DemoProduct {
                id: 2,
                name: "Phone".to_string(),
                price: dec!(500),
                category: "Electronics".to_string(),
            },
            DemoProduct {
                id: 3,
                name: "Shoes".to_string(),
                price: dec!(100),
                category: "Fashion".to_string(),
            },
        ];
        let next_id = items.len() as u64 + 1;

        Self {
            items: RwLock::new(items),
            next_id: AtomicU64::new(next_id),
        }
    }
}

impl Default for InMemoryDemoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DemoStore for InMemoryDemoStore {
    async fn list(&self) -> Vec<DemoProduct> {
        self.items.read().await.clone()
    }

    async fn get(&self, id: u64) -> Option<DemoProduct> {
        self.items.read().await.iter().find(|p| p.id == id).cloned()
    }

    async fn insert(&self, name: String, price: Decimal, category: String) -> DemoProduct {
        let product = DemoProduct {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name,
            price,
            category,
        };

        self.items.write().await.push(product.clone());
        product
    }

    async fn update(&self, id: u64, patch: DemoProductPatch) -> Option<DemoProduct> {
        let mut items = self.items.write().await;
        let product = items.iter_mut().find(|p| p.id == id)?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }

        Some(product.clone())
    }

    async fn delete(&self, id: u64) -> bool {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|p| p.id != id);
        items.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_data_matches_the_fixture_catalog() {
        let store = InMemoryDemoStore::with_seed_data();
        let items = store.list().await;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "Laptop");
        assert_eq!(items[1].price, dec!(500));
        assert_eq!(items[2].category, "Fashion");
    }

    #[tokio::test]
    async fn ids_keep_increasing_after_deletes() {
        let store = InMemoryDemoStore::with_seed_data();

        let created = store
            .insert("Watch".into(), dec!(250), "Electronics".into())
            .await;
        assert_eq!(created.id, 4);

        assert!(store.delete(created.id).await);
        assert!(store.delete(2).await);

        // Two records gone, yet the next id never revisits a live one.
        let next = store
            .insert("Tablet".into(), dec!(400), "Electronics".into())
            .await;
        assert_eq!(next.id, 5);
        assert_eq!(store.list().await.len(), 3);
    }

    #[tokio::test]
    async fn update_patches_only_the_supplied_fields() {
        let store = InMemoryDemoStore::with_seed_data();

        let updated = store
            .update(
                2,
                DemoProductPatch {
                    price: Some(dec!(450)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Phone");
        assert_eq!(updated.price, dec!(450));
        assert_eq!(updated.category, "Electronics");
    }

    #[tokio::test]
    async fn missing_ids_are_reported_as_absent() {
        let store = InMemoryDemoStore::with_seed_data();

        assert!(store.get(42).await.is_none());
        assert!(store.update(42, DemoProductPatch::default()).await.is_none());
        assert!(!store.delete(42).await);
    }
}
