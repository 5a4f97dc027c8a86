//! HTTP-level tests of the product API against in-memory repositories.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request, StatusCode},
    Router,
};
use catalog_config::ServerConfig;
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{DatabasePoolInterface, InMemoryProductRepository, InMemoryProductTypeRepository};
use catalog_resilience::{DeadlineConfig, DeadlineGuard};
use catalog_rest::{create_router, AppState};
use catalog_service::{
    MemoryCache, ProductServiceImpl, ProductTypeServiceImpl, PRODUCTS_NAMESPACE, PRODUCT_TYPES_NAMESPACE,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

struct StubDatabase {
    healthy: bool,
}

#[async_trait]
impl DatabasePoolInterface for StubDatabase {
    async fn health_check(&self) -> CatalogResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(CatalogError::Database("connection refused".to_string()))
        }
    }

    async fn run_migrations(&self) -> CatalogResult<()> {
        Ok(())
    }

    async fn close(&self) {}
}

fn app_with_database(healthy: bool) -> Router {
    let deadline = Arc::new(
        DeadlineGuard::new(DeadlineConfig {
            timeout: Duration::from_secs(5),
            worker_threads: 2,
        })
        .unwrap(),
    );
    let types = InMemoryProductTypeRepository::seeded();
    let product_types = Arc::new(ProductTypeServiceImpl::new(
        Arc::new(types.clone()),
        Arc::new(MemoryCache::new(PRODUCT_TYPES_NAMESPACE, Duration::from_secs(600), 100)),
        Arc::clone(&deadline),
    ));
    let products = Arc::new(ProductServiceImpl::new(
        Arc::new(InMemoryProductRepository::new(types)),
        product_types,
        Arc::new(MemoryCache::new(PRODUCTS_NAMESPACE, Duration::from_secs(600), 100)),
        deadline,
    ));

    let state = AppState::new(products, Arc::new(StubDatabase { healthy }));
    create_router(state, &ServerConfig::default())
}

fn app() -> Router {
    app_with_database(true)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, HeaderMap, Value) {
    send_request(app, request(method, uri, body).body_or_empty()).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}

struct PendingRequest {
    builder: axum::http::request::Builder,
    body: Option<Value>,
}

fn request(method: Method, uri: &str, body: Option<Value>) -> PendingRequest {
    PendingRequest {
        builder: Request::builder().method(method).uri(uri),
        body,
    }
}

impl PendingRequest {
    fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    fn body_or_empty(self) -> Request<Body> {
        match self.body {
            Some(body) => self
                .builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => self.builder.body(Body::empty()).unwrap(),
        }
    }
}

fn new_card(open: bool) -> Value {
    json!({
        "name": "New card",
        "productTypeId": 1,
        "description": "New Test Card Description",
        "open": open
    })
}

#[tokio::test]
async fn test_create_then_get() {
    let app = app();

    let (status, _, created) = send(&app, Method::POST, "/api/v1/products", Some(new_card(false))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "New card");
    assert_eq!(created["productTypeId"], 1);
    assert_eq!(created["description"], "New Test Card Description");
    assert!(created["openDate"].is_null());
    assert!(created["closeDate"].is_null());

    let (status, _, fetched) = send(&app, Method::GET, "/api/v1/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_with_unknown_type_is_404() {
    let app = app();
    let mut body = new_card(false);
    body["productTypeId"] = json!(9999);

    let (status, _, error) = send(&app, Method::POST, "/api/v1/products", Some(body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Product type with id 9999 not found");
}

#[tokio::test]
async fn test_not_found_error_body() {
    let app = app();
    let req = request(Method::GET, "/api/v1/products/99", None)
        .header("x-request-id", "req-42")
        .body_or_empty();

    let (status, headers, error) = send_request(&app, req).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["status"], 404);
    assert_eq!(error["path"], "/api/v1/products/99");
    assert_eq!(error["error"], "Product with id=99 not found");
    assert_eq!(error["requestId"], "req-42");
    assert!(error["timestamp"].is_string());
    assert_eq!(headers["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_request_id_generated_when_absent() {
    let app = app();

    let (_, headers, error) = send(&app, Method::GET, "/api/v1/products/99", None).await;

    let request_id = error["requestId"].as_str().unwrap();
    assert!(!request_id.is_empty());
    assert_eq!(headers["x-request-id"], request_id);
}

#[tokio::test]
async fn test_invalid_request_is_400() {
    let app = app();
    let mut body = new_card(false);
    body["name"] = json!("ab");

    let (status, _, error) = send(&app, Method::POST, "/api/v1/products", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["status"], 400);
    assert!(error["error"].as_str().unwrap().starts_with("Validation error: name"));
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/products")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();

    let (status, _, error) = send_request(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["path"], "/api/v1/products");
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let app = app();

    let (status, _, error) = send(&app, Method::GET, "/api/v1/products/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Invalid product ID: abc");
}

#[tokio::test]
async fn test_update_keeps_open_date() {
    let app = app();
    let (_, _, created) = send(&app, Method::POST, "/api/v1/products", Some(new_card(true))).await;

    let update = json!({
        "name": "Updated card",
        "description": "Updated Test Card Description",
        "open": null
    });
    let (status, _, updated) = send(&app, Method::PUT, "/api/v1/products/1", Some(update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Updated card");
    assert_eq!(updated["description"], "Updated Test Card Description");
    assert_eq!(updated["openDate"], created["openDate"]);
    assert!(updated["closeDate"].is_null());
}

#[tokio::test]
async fn test_reopen_closed_product_is_400() {
    let app = app();
    send(&app, Method::POST, "/api/v1/products", Some(new_card(true))).await;

    let (status, _, closed) = send(&app, Method::PUT, "/api/v1/products/1", Some(json!({"open": false}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(closed["closeDate"].is_string());

    let (status, _, error) = send(&app, Method::PUT, "/api/v1/products/1", Some(json!({"open": true}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Product is already closed");
}

#[tokio::test]
async fn test_delete_product() {
    let app = app();
    send(&app, Method::POST, "/api/v1/products", Some(new_card(false))).await;

    let (status, _, body) = send(&app, Method::DELETE, "/api/v1/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let (status, _, _) = send(&app, Method::GET, "/api/v1/products/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::DELETE, "/api/v1/products/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_by_type() {
    let app = app();
    send(&app, Method::POST, "/api/v1/products", Some(new_card(true))).await;
    let mut deposit = new_card(false);
    deposit["name"] = json!("New deposit");
    deposit["productTypeId"] = json!(3);
    send(&app, Method::POST, "/api/v1/products", Some(deposit)).await;

    let (status, _, all) = send(&app, Method::GET, "/api/v1/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, _, unfiltered) = send(&app, Method::GET, "/api/v1/products?type=", None).await;
    assert_eq!(unfiltered, all);

    let (_, _, cards) = send(&app, Method::GET, "/api/v1/products?type=card", None).await;
    let cards = cards.as_array().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["name"], "New card");

    let (status, _, unknown) = send(&app, Method::GET, "/api/v1/products?type=mortgage", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unknown, json!([]));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, _, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");

    let (status, _, _) = send(&app, Method::GET, "/live", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_not_ready_without_database() {
    let app = app_with_database(false);

    let (status, _, _) = send(&app, Method::GET, "/ready", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
