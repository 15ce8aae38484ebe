use crate::handlers::common::{created_response, success_response, MessageResponse};
use crate::services::products::UpdateProductInput;
use crate::validation::{self, VariantFields};
use crate::{
    entities::{ProductModel, ProductVariant},
    errors::ServiceError,
    AppState,
};
use axum::{
    extract::{Json, Path, State},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Creates the router for product endpoints
pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let variants = payload.variants.map(to_variant_fields);

    let draft = validation::validate_product(
        payload.name.as_deref(),
        payload.description.as_deref(),
        payload.price,
        payload.category.as_deref(),
        payload.stock,
        variants.as_deref(),
    )?;

    let product = state.services.products.create(draft).await?;

    Ok(created_response(ProductResponse::from(product)))
}

/// List all products
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "Products retrieved", body = [ProductResponse])
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let products = state.services.products.list().await?;

    let products: Vec<ProductResponse> =
        products.into_iter().map(ProductResponse::from).collect();

    Ok(success_response(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product retrieved", body = ProductResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let product = state.services.products.get(id).await?;

    Ok(success_response(ProductResponse::from(product)))
}

/// Merge-update a product
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let input = UpdateProductInput {
        name: payload.name,
        description: payload.description,
        price: payload.price,
        category: payload.category,
        stock: payload.stock,
        variants: payload.variants.map(to_variant_fields),
    };

    let product = state.services.products.update(id, input).await?;

    Ok(success_response(ProductResponse::from(product)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    state.services.products.delete(id).await?;

    Ok(success_response(MessageResponse::new(
        "Product deleted successfully",
    )))
}

fn to_variant_fields(payloads: Vec<VariantPayload>) -> Vec<VariantFields> {
    payloads
        .into_iter()
        .map(|v| VariantFields {
            name: v.name,
            additional_price: v.additional_price,
        })
        .collect()
}

// Request/Response DTOs

/// Raw variant item as sent by the caller.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    /// Variant display name
    #[schema(example = "Large")]
    pub name: Option<String>,
    /// Surcharge on top of the base product price
    #[serde(default)]
    #[schema(example = "5.00")]
    pub additional_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "Phone",
    "description": "Unlocked, 128 GB",
    "price": "500",
    "category": "550e8400-e29b-41d4-a716-446655440000",
    "stock": 10,
    "variants": [{ "name": "Black" }, { "name": "Silver", "additionalPrice": "20" }]
}))]
pub struct CreateProductRequest {
    /// Product display name (2-100 characters)
    pub name: Option<String>,
    /// Product description (max 500 characters)
    #[serde(default)]
    pub description: Option<String>,
    /// Product price, strictly positive
    pub price: Option<Decimal>,
    /// Id of the category this product belongs to
    pub category: Option<String>,
    /// Units on hand, defaults to 0
    #[serde(default)]
    pub stock: Option<i64>,
    /// Ordered variant list
    #[serde(default)]
    pub variants: Option<Vec<VariantPayload>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub variants: Option<Vec<VariantPayload>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "id": "9aa2c7f0-3f6b-4c55-bd2a-1f6b8a2f9c10",
    "name": "Phone",
    "description": "Unlocked, 128 GB",
    "price": "500",
    "category": "550e8400-e29b-41d4-a716-446655440000",
    "stock": 10,
    "variants": [{ "name": "Black" }],
    "createdAt": "2025-03-01T10:30:00Z"
}))]
pub struct ProductResponse {
    /// Product UUID
    pub id: Uuid,
    /// Product display name
    pub name: String,
    /// Product description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Product price
    pub price: Decimal,
    /// Id of the category this product belongs to
    pub category: Uuid,
    /// Units on hand
    pub stock: i32,
    /// Ordered variant list
    pub variants: Vec<ProductVariant>,
    /// Creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<ProductModel> for ProductResponse {
    fn from(model: ProductModel) -> Self {
        let variants = model.variant_list();

        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category_id,
            stock: model.stock,
            variants,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn create_request_accepts_camel_case_variant_fields() {
        let payload: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Phone",
            "price": 500,
            "category": "550e8400-e29b-41d4-a716-446655440000",
            "variants": [{ "name": "Silver", "additionalPrice": 20 }]
        }))
        .unwrap();

        let variants = payload.variants.unwrap();
        assert_eq!(variants[0].additional_price, Some(dec!(20)));
        assert_eq!(payload.stock, None);
    }

    #[test]
    fn response_serializes_created_at_as_camel_case() {
        let model = ProductModel {
            id: Uuid::new_v4(),
            name: "Phone".into(),
            description: None,
            price: dec!(500),
            category_id: Uuid::new_v4(),
            stock: 10,
            variants: serde_json::json!([]),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(ProductResponse::from(model)).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
        assert!(json.get("description").is_none());
        assert_eq!(json["price"], "500");
    }

    #[test]
    fn rejected_payload_still_reports_the_first_violation() {
        let payload: CreateProductRequest = serde_json::from_str("{}").unwrap();
        let err = validation::validate_product(
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.price,
            payload.category.as_deref(),
            payload.stock,
            None,
        )
        .unwrap_err();
        assert_eq!(err.0, "name is required");
    }
}
