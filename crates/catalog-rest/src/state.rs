//! Application state for Axum handlers.

use catalog_repository::DatabasePoolInterface;
use catalog_service::ProductService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub database: Arc<dyn DatabasePoolInterface>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(product_service: Arc<dyn ProductService>, database: Arc<dyn DatabasePoolInterface>) -> Self {
        Self {
            product_service,
            database,
        }
    }
}
