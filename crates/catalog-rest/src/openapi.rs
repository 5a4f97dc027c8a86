//! OpenAPI documentation configuration.

use crate::controllers::health_controller::HealthResponse;
use crate::responses::ApiError;
use catalog_service::{NewProductRequest, ProductResponse, UpdateProductRequest};
use utoipa::OpenApi;

/// OpenAPI documentation for the product catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Omni Product Catalog API",
        version = "1.0.0",
        description = "Lifecycle management of cards, credits and deposits"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::get_product,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::update_product,
        crate::controllers::product_controller::delete_product,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            NewProductRequest,
            UpdateProductRequest,
            ProductResponse,
            ApiError,
            HealthResponse,
        )
    ),
    tags(
        (name = "products", description = "Product lifecycle endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
