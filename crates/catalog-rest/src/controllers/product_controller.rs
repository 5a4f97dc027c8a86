//! Product controller.

use crate::{
    extractors::ValidatedJson,
    responses::{created, ok, ApiError, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_core::{CatalogError, ProductId};
use catalog_service::{NewProductRequest, ProductResponse, UpdateProductRequest};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
}

/// Query parameters of the product list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsQuery {
    /// Product type name; empty means no filter.
    #[serde(rename = "type")]
    pub product_type: Option<String>,
}

/// List products, optionally filtered by product type name.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Products, newest open date first", body = [ProductResponse]),
        (status = 503, description = "Service call timeout", body = ApiError)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> ApiResult<Vec<ProductResponse>> {
    debug!("List products request, type: {:?}", query.product_type);

    let products = state
        .product_service
        .list_products(query.product_type.as_deref())
        .await?;
    ok(products)
}

/// Get a product by ID.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = ApiError),
        (status = 503, description = "Service call timeout", body = ApiError)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductResponse> {
    debug!("Get product request: {}", id);

    let product_id = parse_product_id(&id)?;
    let product = state.product_service.get_product(product_id).await?;
    ok(product)
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = NewProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Product type not found", body = ApiError),
        (status = 503, description = "Service call timeout", body = ApiError)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<NewProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    debug!("Create product request: {}", request.name);

    let product = state.product_service.create_product(request).await?;
    Ok(created(product))
}

/// Update a product. Absent fields are left untouched.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation failed or product already closed", body = ApiError),
        (status = 404, description = "Product not found", body = ApiError),
        (status = 503, description = "Service call timeout", body = ApiError)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProductRequest>,
) -> ApiResult<ProductResponse> {
    debug!("Update product request: {}", id);

    let product_id = parse_product_id(&id)?;
    let product = state.product_service.update_product(product_id, request).await?;
    ok(product)
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ApiError),
        (status = 503, description = "Service call timeout", body = ApiError)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete product request: {}", id);

    let product_id = parse_product_id(&id)?;
    state.product_service.delete_product(product_id).await?;
    Ok(StatusCode::OK)
}

fn parse_product_id(id: &str) -> Result<ProductId, AppError> {
    id.parse::<i64>()
        .map(ProductId)
        .map_err(|_| AppError(CatalogError::bad_request(format!("Invalid product ID: {}", id))))
}
