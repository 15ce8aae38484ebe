//! Handlers for the self-contained demo catalog under `/api/products`.
//!
//! This endpoint is deliberately loose: create only insists on a name and a
//! price, updates are unvalidated merges, and everything lives in process
//! memory behind the injectable [`DemoStore`].

use crate::demo::{DemoProduct, DemoProductPatch, DemoStore};
use crate::errors::ServiceError;
use crate::handlers::common::{created_response, success_response, MessageResponse};
use axum::{
    extract::{Json, Path, Query, State},
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

pub type DemoState = Arc<dyn DemoStore>;

const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Creates the router for the demo catalog endpoints
pub fn demo_routes() -> Router<DemoState> {
    Router::new()
        .route("/", get(list_demo_products).post(create_demo_product))
        .route(
            "/:id",
            get(get_demo_product)
                .put(update_demo_product)
                .delete(delete_demo_product),
        )
}

/// List demo products, optionally filtered
#[utoipa::path(
    get,
    path = "/api/products",
    params(DemoListParams),
    responses(
        (status = 200, description = "Demo products retrieved", body = [DemoProduct])
    ),
    tag = "Demo Products"
)]
pub async fn list_demo_products(
    State(store): State<DemoState>,
    Query(params): Query<DemoListParams>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let products: Vec<DemoProduct> = store
        .list()
        .await
        .into_iter()
        .filter(|p| params.matches(p))
        .collect();

    Ok(success_response(products))
}

/// Get a demo product by ID
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = u64, Path, description = "Demo product ID")
    ),
    responses(
        (status = 200, description = "Demo product retrieved", body = DemoProduct),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Demo Products"
)]
pub async fn get_demo_product(
    State(store): State<DemoState>,
    Path(id): Path<u64>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let product = store
        .get(id)
        .await
        .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

    Ok(success_response(product))
}

/// Create a demo product
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateDemoProductRequest,
    responses(
        (status = 201, description = "Demo product created", body = DemoProduct),
        (status = 400, description = "Name or price missing", body = crate::errors::ErrorResponse)
    ),
    tag = "Demo Products"
)]
pub async fn create_demo_product(
    State(store): State<DemoState>,
    Json(payload): Json<CreateDemoProductRequest>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let (Some(name), Some(price)) = (payload.name, payload.price) else {
        return Err(ServiceError::Validation(
            "Name and price are required".to_string(),
        ));
    };

    let category = payload
        .category
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let product = store.insert(name, price, category).await;

    Ok(created_response(product))
}

/// Merge-update a demo product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = u64, Path, description = "Demo product ID")
    ),
    request_body = UpdateDemoProductRequest,
    responses(
        (status = 200, description = "Demo product updated", body = DemoProduct),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Demo Products"
)]
pub async fn update_demo_product(
    State(store): State<DemoState>,
    Path(id): Path<u64>,
    Json(payload): Json<UpdateDemoProductRequest>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let patch = DemoProductPatch {
        name: payload.name,
        price: payload.price,
        category: payload.category,
    };

    let product = store
        .update(id, patch)
        .await
        .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

    Ok(success_response(product))
}

/// Delete a demo product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = u64, Path, description = "Demo product ID")
    ),
    responses(
        (status = 200, description = "Demo product deleted", body = MessageResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Demo Products"
)]
pub async fn delete_demo_product(
    State(store): State<DemoState>,
    Path(id): Path<u64>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    if !store.delete(id).await {
        return Err(ServiceError::NotFound("Product not found".to_string()));
    }

    Ok(success_response(MessageResponse::new(
        "Product deleted successfully",
    )))
}

// Request DTOs and query parameters

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DemoListParams {
    /// Exact category match, case-insensitive
    #[serde(default)]
    pub category: Option<String>,
    /// Inclusive lower price bound
    #[serde(default)]
    pub price_min: Option<Decimal>,
    /// Inclusive upper price bound
    #[serde(default)]
    pub price_max: Option<Decimal>,
}

impl DemoListParams {
    fn matches(&self, product: &DemoProduct) -> bool {
        if let Some(ref category) = self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(price_min) = self.price_min {
            if product.price < price_min {
                return false;
            }
        }
        if let Some(price_max) = self.price_max {
            if product.price > price_max {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({ "name": "Monitor", "price": "300", "category": "Electronics" }))]
pub struct CreateDemoProductRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDemoProductRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(name: &str, price: Decimal, category: &str) -> DemoProduct {
        DemoProduct {
            id: 1,
            name: name.into(),
            price,
            category: category.into(),
        }
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let params = DemoListParams {
            category: Some("electronics".into()),
            ..Default::default()
        };
        assert!(params.matches(&product("Laptop", dec!(1000), "Electronics")));
        assert!(!params.matches(&product("Shoes", dec!(100), "Fashion")));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let params = DemoListParams {
            price_min: Some(dec!(100)),
            price_max: Some(dec!(500)),
            ..Default::default()
        };
        assert!(params.matches(&product("Shoes", dec!(100), "Fashion")));
        assert!(params.matches(&product("Phone", dec!(500), "Electronics")));
        assert!(!params.matches(&product("Laptop", dec!(1000), "Electronics")));
    }

    #[test]
    fn filters_combine_conjunctively() {
        let params = DemoListParams {
            category: Some("electronics".into()),
            price_min: Some(dec!(600)),
            ..Default::default()
        };
        assert!(params.matches(&product("Laptop", dec!(1000), "Electronics")));
        assert!(!params.matches(&product("Phone", dec!(500), "Electronics")));
    }
}
