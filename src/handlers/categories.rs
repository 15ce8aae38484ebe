use crate::handlers::common::{created_response, success_response, MessageResponse};
use crate::services::categories::UpdateCategoryInput;
use crate::{entities::CategoryModel, errors::ServiceError, validation, AppState};
use axum::{
    extract::{Json, Path, State},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Creates the router for category endpoints
pub fn categories_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid payload or duplicate name", body = crate::errors::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let draft =
        validation::validate_category(payload.name.as_deref(), payload.description.as_deref())?;

    let category = state.services.categories.create(draft).await?;

    Ok(created_response(CategoryResponse::from(category)))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Categories retrieved", body = [CategoryResponse])
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let categories = state.services.categories.list().await?;

    let categories: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();

    Ok(success_response(categories))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category retrieved", body = CategoryResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let category = state.services.categories.get(id).await?;

    Ok(success_response(CategoryResponse::from(category)))
}

/// Merge-update a category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Invalid payload or duplicate name", body = crate::errors::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let input = UpdateCategoryInput {
        name: payload.name,
        description: payload.description,
    };

    let category = state.services.categories.update(id, input).await?;

    Ok(success_response(CategoryResponse::from(category)))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    state.services.categories.delete(id).await?;

    Ok(success_response(MessageResponse::new(
        "Category deleted successfully",
    )))
}

// Request/Response DTOs

#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({ "name": "Electronics", "description": "Devices and gadgets" }))]
pub struct CreateCategoryRequest {
    /// Category display name (2-100 characters)
    #[schema(example = "Electronics")]
    pub name: Option<String>,
    /// Category description (max 500 characters)
    #[serde(default)]
    #[schema(example = "Devices and gadgets")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "id": "550e8400-e29b-41d4-a716-446655440000",
    "name": "Electronics",
    "description": "Devices and gadgets"
}))]
pub struct CategoryResponse {
    /// Category UUID
    pub id: Uuid,
    /// Category display name
    pub name: String,
    /// Category description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<CategoryModel> for CategoryResponse {
    fn from(model: CategoryModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}
