use crate::{
    entities::{product, Category, Product, ProductModel},
    errors::ServiceError,
    events::{Event, EventSender},
    validation::{self, ProductDraft, VariantFields},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Product CRUD over the persistent store.
#[derive(Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

/// Merge-update input; absent fields leave the stored values untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<rust_decimal::Decimal>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub variants: Option<Vec<VariantFields>>,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// A product may only reference a category that exists; deletes do not
    /// cascade, so the check runs on every write that sets the reference.
    async fn ensure_category_exists(&self, category_id: Uuid) -> Result<(), ServiceError> {
        Category::find_by_id(category_id)
            .one(&*self.db)
            .await?
            .map(|_| ())
            .ok_or_else(|| {
                ServiceError::Validation(format!("category {} does not exist", category_id))
            })
    }

    /// Create a new product
    #[instrument(skip(self))]
    pub async fn create(&self, draft: ProductDraft) -> Result<ProductModel, ServiceError> {
        self.ensure_category_exists(draft.category_id).await?;

        let product_id = Uuid::new_v4();
        let now = Utc::now();

        let product = product::ActiveModel {
            id: Set(product_id),
            name: Set(draft.name),
            description: Set(draft.description),
            price: Set(draft.price),
            category_id: Set(draft.category_id),
            stock: Set(draft.stock),
            variants: Set(serde_json::to_value(&draft.variants).unwrap_or_default()),
            created_at: Set(now),
        };

        let product = product.insert(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::ProductCreated(product_id))
            .await;

        info!("Created product: {}", product_id);
        Ok(product)
    }

    /// List all products in store order
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ProductModel>, ServiceError> {
        Product::find().all(&*self.db).await.map_err(Into::into)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get(&self, product_id: Uuid) -> Result<ProductModel, ServiceError> {
        Product::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))
    }

    /// Merge-update an existing product.
    ///
    /// Supplied fields overwrite stored values, the merged record is run
    /// through the same rules as create, and a changed category reference is
    /// re-checked for existence.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> Result<ProductModel, ServiceError> {
        let existing = self.get(product_id).await?;

        let merged_category = input
            .category
            .clone()
            .unwrap_or_else(|| existing.category_id.to_string());
        let merged_variants: Vec<VariantFields> = match input.variants {
            Some(variants) => variants,
            None => existing
                .variant_list()
                .into_iter()
                .map(|v| VariantFields {
                    name: Some(v.name),
                    additional_price: v.additional_price,
                })
                .collect(),
        };

        let draft = validation::validate_product(
            input.name.as_deref().or(Some(existing.name.as_str())),
            input
                .description
                .as_deref()
                .or(existing.description.as_deref()),
            input.price.or(Some(existing.price)),
            Some(merged_category.as_str()),
            input.stock.or(Some(i64::from(existing.stock))),
            Some(&merged_variants),
        )?;

        if draft.category_id != existing.category_id {
            self.ensure_category_exists(draft.category_id).await?;
        }

        let mut active: product::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.description = Set(draft.description);
        active.price = Set(draft.price);
        active.category_id = Set(draft.category_id);
        active.stock = Set(draft.stock);
        active.variants = Set(serde_json::to_value(&draft.variants).unwrap_or_default());

        let product = active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::ProductUpdated(product_id))
            .await;

        info!("Updated product: {}", product_id);
        Ok(product)
    }

    /// Delete a product by ID
    #[instrument(skip(self))]
    pub async fn delete(&self, product_id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(product_id).await?;
        existing.delete(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::ProductDeleted(product_id))
            .await;

        info!("Deleted product: {}", product_id);
        Ok(())
    }
}
