//! Explicit component wiring.
//!
//! ```text
//! ProductServiceImpl ──> ProductTypeServiceImpl ──> ProductTypeRepository
//!        │                      │
//!        │                      └──> productTypes cache
//!        ├──> ProductRepository
//!        └──> products cache
//! ```
//!
//! Both services share one [`DeadlineGuard`] and its worker pool.

use catalog_config::{AppConfig, ProductConfig};
use catalog_core::CatalogResult;
use catalog_repository::{
    DatabasePool, PgProductRepository, PgProductTypeRepository, ProductRepository, ProductTypeRepository,
};
use catalog_resilience::{DeadlineConfig, DeadlineGuard};
use catalog_service::{
    MemoryCache, ProductService, ProductServiceImpl, ProductTypeService, ProductTypeServiceImpl,
    PRODUCTS_NAMESPACE, PRODUCT_TYPES_NAMESPACE,
};
use std::sync::Arc;
use tracing::info;

/// The wired service graph. The resolver and the guard are owned by the
/// product service.
pub struct AppComponents {
    pub product_service: Arc<dyn ProductService>,
}

impl AppComponents {
    /// Wires the services over the PostgreSQL repositories.
    pub fn build(config: &AppConfig, database: &DatabasePool) -> CatalogResult<Self> {
        let pool = database.inner().clone();
        Self::with_repositories(
            config,
            Arc::new(PgProductRepository::new(pool.clone())),
            Arc::new(PgProductTypeRepository::new(pool)),
        )
    }

    /// Wires the services over the given repositories.
    pub fn with_repositories(
        config: &AppConfig,
        product_repository: Arc<dyn ProductRepository>,
        product_type_repository: Arc<dyn ProductTypeRepository>,
    ) -> CatalogResult<Self> {
        let deadline = Arc::new(DeadlineGuard::new(deadline_config(&config.product))?);

        let product_type_service: Arc<dyn ProductTypeService> = Arc::new(ProductTypeServiceImpl::new(
            product_type_repository,
            Arc::new(MemoryCache::from_config(PRODUCT_TYPES_NAMESPACE, &config.cache)),
            Arc::clone(&deadline),
        ));

        let product_service: Arc<dyn ProductService> = Arc::new(ProductServiceImpl::new(
            product_repository,
            product_type_service,
            Arc::new(MemoryCache::from_config(PRODUCTS_NAMESPACE, &config.cache)),
            deadline,
        ));

        info!(
            timeout_ms = config.product.timeout_ms,
            worker_threads = config.product.worker_threads,
            cache_ttl_secs = config.cache.ttl_secs,
            "Product services wired"
        );

        Ok(Self { product_service })
    }
}

/// Deadline settings of the product services.
#[must_use]
pub fn deadline_config(config: &ProductConfig) -> DeadlineConfig {
    DeadlineConfig {
        timeout: config.timeout(),
        worker_threads: config.worker_threads,
    }
}
