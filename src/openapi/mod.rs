use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        version = "1.0.0",
        description = r#"
# Product Catalog API

API for managing a product catalog.

## Features

- **Categories**: Create, update, and delete product categories with unique names
- **Products**: Full product lifecycle with prices, stock levels, and variants
- **Demo Catalog**: A self-contained in-memory product list with query filtering

## Error Handling

Failing requests return a JSON body with a single message field and an
appropriate status code:

```json
{
  "message": "Product not found"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development")
    ),
    tags(
        (name = "Categories", description = "Category management endpoints"),
        (name = "Products", description = "Product management endpoints"),
        (name = "Demo Products", description = "In-memory demo catalog endpoints")
    ),
    paths(
        // Categories
        crate::handlers::categories::create_category,
        crate::handlers::categories::list_categories,
        crate::handlers::categories::get_category,
        crate::handlers::categories::update_category,
        crate::handlers::categories::delete_category,

        // Products
        crate::handlers::products::create_product,
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,

        // Demo catalog
        crate::handlers::demo::list_demo_products,
        crate::handlers::demo::get_demo_product,
        crate::handlers::demo::create_demo_product,
        crate::handlers::demo::update_demo_product,
        crate::handlers::demo::delete_demo_product,
    ),
    components(
        schemas(
            // Category types
            crate::handlers::categories::CreateCategoryRequest,
            crate::handlers::categories::UpdateCategoryRequest,
            crate::handlers::categories::CategoryResponse,

            // Product types
            crate::handlers::products::CreateProductRequest,
            crate::handlers::products::UpdateProductRequest,
            crate::handlers::products::ProductResponse,
            crate::handlers::products::VariantPayload,
            crate::entities::ProductVariant,

            // Demo catalog types
            crate::demo::DemoProduct,
            crate::handlers::demo::CreateDemoProductRequest,
            crate::handlers::demo::UpdateDemoProductRequest,

            // Common types
            crate::handlers::common::MessageResponse,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api-docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
