//! Integration tests for the in-memory demo catalog endpoints.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use catalog_api::demo::InMemoryDemoStore;
use catalog_api::handlers::demo::{demo_routes, DemoState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn demo_app() -> Router {
    let store: DemoState = Arc::new(InMemoryDemoStore::with_seed_data());
    demo_routes().with_state(store)
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn list_returns_the_seed_catalog() {
    let app = demo_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products = body_json(response).await;
    let products = products.as_array().unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0]["name"], "Laptop");
    assert_eq!(products[2]["category"], "Fashion");
}

#[tokio::test]
async fn filters_combine_category_and_price_bounds() {
    let app = demo_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?category=electronics&price_min=600")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products = body_json(response).await;
    let products = products.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Laptop");
    assert_eq!(products[0]["price"], "1000");
}

#[tokio::test]
async fn price_bounds_are_inclusive() {
    let app = demo_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?price_min=100&price_max=500")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let products = body_json(response).await;
    let names: Vec<&str> = products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Phone", "Shoes"]);
}

#[tokio::test]
async fn get_by_id_and_missing_id() {
    let app = demo_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/2").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Phone");

    let response = app
        .oneshot(Request::builder().uri("/99").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Product not found");
}

#[tokio::test]
async fn create_requires_name_and_price() {
    let app = demo_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("Content-Type", "application/json")
                .body(Body::from(json!({ "name": "Monitor" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Name and price are required"
    );

    // Seed catalog is untouched by the failed create.
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn create_defaults_the_category_and_assigns_the_next_id() {
    let app = demo_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({ "name": "Monitor", "price": 300 }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let product = body_json(response).await;
    assert_eq!(product["id"], 4);
    assert_eq!(product["category"], "Uncategorized");
    assert_eq!(product["price"], "300");
}

#[tokio::test]
async fn update_overwrites_only_the_supplied_fields() {
    let app = demo_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/2")
                .header("Content-Type", "application/json")
                .body(Body::from(json!({ "price": 450 }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let product = body_json(response).await;
    assert_eq!(product["name"], "Phone");
    assert_eq!(product["price"], "450");
    assert_eq!(product["category"], "Electronics");

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/99")
                .header("Content-Type", "application/json")
                .body(Body::from(json!({ "price": 1 }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_confirms_and_subsequent_get_is_absent() {
    let app = demo_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Product deleted successfully"
    );

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/3").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A fresh create must not reuse the deleted record's id.
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({ "name": "Sandals", "price": 40, "category": "Fashion" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(response).await["id"], 4);
}
