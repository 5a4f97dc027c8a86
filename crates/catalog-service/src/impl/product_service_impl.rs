//! Product lifecycle service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{NewProductRequest, ProductResponse, UpdateProductRequest};
use crate::product_service::ProductService;
use crate::product_type_service::ProductTypeService;
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, Product, ProductId, ValidateExt};
use catalog_repository::ProductRepository;
use catalog_resilience::DeadlineGuard;
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Product service over the `products` cache namespace.
///
/// Mutations touch the cache in a fixed order once the store has accepted
/// them:
///
/// | Operation | Sequence |
/// |---|---|
/// | create | `clear`, `put(id)` |
/// | update | `evict(id)`, `clear`, `put(id)` |
/// | delete | `evict(id)`, `clear` |
///
/// A write that times out has an unknown outcome, so the namespace is
/// cleared before the timeout is returned.
pub struct ProductServiceImpl {
    repository: Arc<dyn ProductRepository>,
    product_types: Arc<dyn ProductTypeService>,
    cache: Arc<dyn CacheInterface>,
    deadline: Arc<DeadlineGuard>,
}

impl ProductServiceImpl {
    /// Creates a new product service.
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        product_types: Arc<dyn ProductTypeService>,
        cache: Arc<dyn CacheInterface>,
        deadline: Arc<DeadlineGuard>,
    ) -> Self {
        Self {
            repository,
            product_types,
            cache,
            deadline,
        }
    }

    async fn find_product(&self, id: ProductId) -> CatalogResult<Product> {
        let repository = Arc::clone(&self.repository);
        self.deadline
            .guard(async move { repository.find_by_id(id).await })
            .await?
            .ok_or_else(|| CatalogError::not_found("Product", format!("id={}", id)))
    }

    async fn list_all(&self) -> CatalogResult<Vec<ProductResponse>> {
        let products = self.deadline.guard_stream(self.repository.find_all()).await?;
        to_views(products)
    }

    async fn list_by_type(&self, type_name: &str) -> CatalogResult<Vec<ProductResponse>> {
        match self.product_types.get_product_type_by_name(type_name).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                debug!("Unknown product type '{}', nothing to list", type_name);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        }

        let products = self
            .deadline
            .guard_stream(self.repository.find_all_by_type(type_name))
            .await?;
        to_views(products)
    }

    async fn guarded_write<F, T>(&self, operation: F) -> CatalogResult<T>
    where
        F: Future<Output = CatalogResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        match self.deadline.guard(operation).await {
            Err(e) if e.is_timeout() => {
                warn!("Product write timed out with unknown outcome, clearing product cache");
                if let Err(cache_err) = self.cache.clear().await {
                    warn!("Failed to clear product cache: {}", cache_err);
                }
                Err(e)
            }
            other => other,
        }
    }

    async fn save(&self, product: Product) -> CatalogResult<ProductResponse> {
        let repository = Arc::clone(&self.repository);
        let saved = self
            .guarded_write(async move { repository.save(product).await })
            .await?;
        ProductResponse::try_from(saved)
    }
}

fn to_views(products: Vec<Product>) -> CatalogResult<Vec<ProductResponse>> {
    products.into_iter().map(ProductResponse::try_from).collect()
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn list_products(&self, type_filter: Option<&str>) -> CatalogResult<Vec<ProductResponse>> {
        match type_filter.map(str::trim).filter(|name| !name.is_empty()) {
            None => {
                debug!("Listing all products");
                self.cache
                    .get_or_compute(&cache_keys::all_products(), || self.list_all())
                    .await
            }
            Some(type_name) => {
                debug!("Listing products of type: {}", type_name);
                self.cache
                    .get_or_compute(&cache_keys::products_by_type(type_name), || {
                        self.list_by_type(type_name)
                    })
                    .await
            }
        }
    }

    async fn get_product(&self, id: ProductId) -> CatalogResult<ProductResponse> {
        debug!("Getting product: {}", id);

        self.cache
            .get_or_compute(&cache_keys::product_by_id(id), || async {
                ProductResponse::try_from(self.find_product(id).await?)
            })
            .await
    }

    async fn create_product(&self, request: NewProductRequest) -> CatalogResult<ProductResponse> {
        debug!("Creating product: {}", request.name);

        request.validate_request()?;

        let product_type = self.product_types.get_product_type(request.product_type_id).await?;
        let product = Product::new(
            request.name,
            product_type.id,
            request.description,
            request.open,
            Utc::now(),
        );

        let view = self.save(product).await?;

        self.cache.clear().await?;
        self.cache.put(&cache_keys::product_by_id(view.id), &view).await?;

        info!(product_type = %product_type.name, "Product created: {}", view.id);
        Ok(view)
    }

    async fn update_product(&self, id: ProductId, request: UpdateProductRequest) -> CatalogResult<ProductResponse> {
        debug!("Updating product: {}", id);

        request.validate_request()?;

        let mut product = self.find_product(id).await?;
        let now = Utc::now();

        if let Some(name) = request.name {
            product.name = name;
        }
        if let Some(description) = request.description {
            product.description = description;
        }
        if let Some(open) = request.open {
            if let Err(e) = product.apply_open_intent(open, now) {
                warn!("Rejected lifecycle change of product {}: {}", id, e);
                return Err(e);
            }
        }
        product.touch(now);

        let view = self.save(product).await?;

        let key = cache_keys::product_by_id(id);
        self.cache.evict(&key).await?;
        self.cache.clear().await?;
        self.cache.put(&key, &view).await?;

        info!("Product updated: {}", id);
        Ok(view)
    }

    async fn delete_product(&self, id: ProductId) -> CatalogResult<()> {
        debug!("Deleting product: {}", id);

        self.find_product(id).await?;

        let repository = Arc::clone(&self.repository);
        self.guarded_write(async move { repository.delete_by_id(id).await })
            .await?;

        self.cache.evict(&cache_keys::product_by_id(id)).await?;
        self.cache.clear().await?;

        info!("Product deleted: {}", id);
        Ok(())
    }
}
