use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product entity for the catalog system
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: Uuid,
    pub stock: i32,
    #[sea_orm(column_type = "Json")]
    pub variants: Json,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Variant payload stored in the `variants` JSON column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Variant display name
    #[schema(example = "Large")]
    pub name: String,
    /// Surcharge on top of the base product price
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "5.00")]
    pub additional_price: Option<Decimal>,
}

impl Model {
    /// Variants as stored; a malformed column is treated as no variants.
    pub fn variant_list(&self) -> Vec<ProductVariant> {
        serde_json::from_value(self.variants.clone()).unwrap_or_default()
    }
}
