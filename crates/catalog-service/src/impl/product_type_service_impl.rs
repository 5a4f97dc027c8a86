//! Product type resolver implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::product_type_service::ProductTypeService;
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, ProductType, ProductTypeId};
use catalog_repository::ProductTypeRepository;
use catalog_resilience::DeadlineGuard;
use std::sync::Arc;
use tracing::debug;

/// Read-through resolver over the `productTypes` cache namespace.
pub struct ProductTypeServiceImpl {
    repository: Arc<dyn ProductTypeRepository>,
    cache: Arc<dyn CacheInterface>,
    deadline: Arc<DeadlineGuard>,
}

impl ProductTypeServiceImpl {
    /// Creates a new product type service.
    pub fn new(
        repository: Arc<dyn ProductTypeRepository>,
        cache: Arc<dyn CacheInterface>,
        deadline: Arc<DeadlineGuard>,
    ) -> Self {
        Self {
            repository,
            cache,
            deadline,
        }
    }
}

#[async_trait]
impl ProductTypeService for ProductTypeServiceImpl {
    async fn get_product_type(&self, id: ProductTypeId) -> CatalogResult<ProductType> {
        debug!("Getting product type: {}", id);

        self.cache
            .get_or_compute(&cache_keys::product_type_by_id(id), || async {
                let repository = Arc::clone(&self.repository);
                self.deadline
                    .guard(async move { repository.find_by_id(id).await })
                    .await?
                    .ok_or_else(|| CatalogError::not_found("Product type", format!("id {}", id)))
            })
            .await
    }

    async fn get_product_type_by_name(&self, name: &str) -> CatalogResult<ProductType> {
        debug!("Getting product type by name: {}", name);

        self.cache
            .get_or_compute(&cache_keys::product_type_by_name(name), || async {
                let repository = Arc::clone(&self.repository);
                let lookup = name.to_string();
                self.deadline
                    .guard(async move { repository.find_by_name(&lookup).await })
                    .await?
                    .ok_or_else(|| CatalogError::not_found("Product type", format!("name {}", name)))
            })
            .await
    }

    async fn list_product_types(&self) -> CatalogResult<Vec<ProductType>> {
        debug!("Listing product types");

        self.cache
            .get_or_compute(&cache_keys::all_product_types(), || async {
                self.deadline.guard_stream(self.repository.find_all()).await
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#impl::test_support::{deadline, product_types_cache, Calls, MockProductTypeRepository};
    use std::time::Duration;

    fn service(repository: Arc<MockProductTypeRepository>, timeout: Duration) -> ProductTypeServiceImpl {
        ProductTypeServiceImpl::new(repository, product_types_cache(), deadline(timeout))
    }

    #[tokio::test]
    async fn test_get_product_type_is_cached() {
        let repository = Arc::new(MockProductTypeRepository::new());
        let service = service(Arc::clone(&repository), Duration::from_secs(5));

        let first = service.get_product_type(ProductTypeId(1)).await.unwrap();
        let second = service.get_product_type(ProductTypeId(1)).await.unwrap();

        assert_eq!(first.name, "card");
        assert_eq!(first, second);
        assert_eq!(Calls::get(&repository.calls.find_by_id), 1);
    }

    #[tokio::test]
    async fn test_get_product_type_by_name() {
        let repository = Arc::new(MockProductTypeRepository::new());
        let service = service(Arc::clone(&repository), Duration::from_secs(5));

        let deposit = service.get_product_type_by_name("deposit").await.unwrap();
        assert_eq!(deposit.id, ProductTypeId(3));

        service.get_product_type_by_name("deposit").await.unwrap();
        assert_eq!(Calls::get(&repository.calls.find_by_name), 1);
    }

    #[tokio::test]
    async fn test_id_and_name_entries_are_independent() {
        let repository = Arc::new(MockProductTypeRepository::new());
        let service = service(Arc::clone(&repository), Duration::from_secs(5));

        service.get_product_type(ProductTypeId(2)).await.unwrap();
        service.get_product_type_by_name("credit").await.unwrap();

        assert_eq!(Calls::get(&repository.calls.find_by_id), 1);
        assert_eq!(Calls::get(&repository.calls.find_by_name), 1);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let repository = Arc::new(MockProductTypeRepository::new());
        let service = service(Arc::clone(&repository), Duration::from_secs(5));

        let err = service.get_product_type(ProductTypeId(9999)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Product type with id 9999 not found");

        service.get_product_type(ProductTypeId(9999)).await.unwrap_err();
        assert_eq!(Calls::get(&repository.calls.find_by_id), 2);
    }

    #[tokio::test]
    async fn test_unknown_name_message() {
        let service = service(Arc::new(MockProductTypeRepository::new()), Duration::from_secs(5));

        let err = service.get_product_type_by_name("mortgage").await.unwrap_err();
        assert_eq!(err.to_string(), "Product type with name mortgage not found");
    }

    #[tokio::test]
    async fn test_list_product_types_ordered_by_id() {
        let repository = Arc::new(MockProductTypeRepository::new());
        let service = service(Arc::clone(&repository), Duration::from_secs(5));

        let names: Vec<String> = service
            .list_product_types()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["card", "credit", "deposit"]);

        service.list_product_types().await.unwrap();
        assert_eq!(Calls::get(&repository.calls.find_all), 1);
    }

    #[tokio::test]
    async fn test_slow_lookup_times_out() {
        let repository = Arc::new(MockProductTypeRepository::slowed(Duration::from_millis(500)));
        let service = service(repository, Duration::from_millis(50));

        let err = service.get_product_type(ProductTypeId(1)).await.unwrap_err();
        assert!(err.is_timeout());
        assert!(!err.is_not_found());
    }
}
