use crate::{
    entities::{category, Category, CategoryModel},
    errors::ServiceError,
    events::{Event, EventSender},
    validation::{self, CategoryDraft},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, Set, SqlErr};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Category CRUD over the persistent store.
#[derive(Clone)]
pub struct CategoryService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

/// Merge-update input; absent fields leave the stored values untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// The unique index on `categories.name` is the duplicate detector; any
/// other failure is a plain store error.
fn map_insert_err(err: DbErr) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ServiceError::Duplicate("Category already exists".to_string())
        }
        _ => ServiceError::Database(err),
    }
}

impl CategoryService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Create a new category
    #[instrument(skip(self))]
    pub async fn create(&self, draft: CategoryDraft) -> Result<CategoryModel, ServiceError> {
        let category_id = Uuid::new_v4();

        let category = category::ActiveModel {
            id: Set(category_id),
            name: Set(draft.name),
            description: Set(draft.description),
        };

        let category = category.insert(&*self.db).await.map_err(map_insert_err)?;

        self.event_sender
            .send_or_log(Event::CategoryCreated(category_id))
            .await;

        info!("Created category: {}", category_id);
        Ok(category)
    }

    /// List all categories in store order
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CategoryModel>, ServiceError> {
        Category::find().all(&*self.db).await.map_err(Into::into)
    }

    /// Get a category by ID
    #[instrument(skip(self))]
    pub async fn get(&self, category_id: Uuid) -> Result<CategoryModel, ServiceError> {
        Category::find_by_id(category_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Category not found".to_string()))
    }

    /// Merge-update an existing category; the merged record is revalidated
    /// before it is written back.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        category_id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<CategoryModel, ServiceError> {
        let existing = self.get(category_id).await?;

        let draft = validation::validate_category(
            input.name.as_deref().or(Some(existing.name.as_str())),
            input
                .description
                .as_deref()
                .or(existing.description.as_deref()),
        )?;

        let mut active: category::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.description = Set(draft.description);

        let category = active.update(&*self.db).await.map_err(map_insert_err)?;

        self.event_sender
            .send_or_log(Event::CategoryUpdated(category_id))
            .await;

        info!("Updated category: {}", category_id);
        Ok(category)
    }

    /// Delete a category by ID
    #[instrument(skip(self))]
    pub async fn delete(&self, category_id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(category_id).await?;
        existing.delete(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::CategoryDeleted(category_id))
            .await;

        info!("Deleted category: {}", category_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn only_unique_violations_become_duplicates() {
        let err = map_insert_err(DbErr::Custom("boom".into()));
        assert_matches!(err, ServiceError::Database(_));
    }
}
