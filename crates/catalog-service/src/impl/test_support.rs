//! Repository doubles shared by the service tests.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Product, ProductId, ProductType, ProductTypeId};
use catalog_repository::{
    EntityStream, InMemoryProductRepository, InMemoryProductTypeRepository, ProductRepository,
    ProductTypeRepository,
};
use catalog_resilience::{DeadlineConfig, DeadlineGuard};
use futures::{stream, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{MemoryCache, PRODUCTS_NAMESPACE, PRODUCT_TYPES_NAMESPACE};

pub fn deadline(timeout: Duration) -> Arc<DeadlineGuard> {
    Arc::new(
        DeadlineGuard::new(DeadlineConfig {
            timeout,
            worker_threads: 2,
        })
        .unwrap(),
    )
}

pub fn products_cache() -> Arc<MemoryCache> {
    Arc::new(MemoryCache::new(PRODUCTS_NAMESPACE, Duration::from_secs(600), 1_000))
}

pub fn product_types_cache() -> Arc<MemoryCache> {
    Arc::new(MemoryCache::new(PRODUCT_TYPES_NAMESPACE, Duration::from_secs(600), 1_000))
}

/// Per-method call counters.
#[derive(Debug, Default)]
pub struct Calls {
    pub find_all: AtomicUsize,
    pub find_all_by_type: AtomicUsize,
    pub find_by_id: AtomicUsize,
    pub find_by_name: AtomicUsize,
    pub save: AtomicUsize,
    pub delete_by_id: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn hit(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

/// Product repository that counts calls and can be slowed down.
pub struct MockProductRepository {
    inner: InMemoryProductRepository,
    pub calls: Arc<Calls>,
    delay: Duration,
    write_delay: Duration,
}

impl MockProductRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryProductRepository::new(InMemoryProductTypeRepository::seeded()),
            calls: Arc::new(Calls::default()),
            delay: Duration::ZERO,
            write_delay: Duration::ZERO,
        }
    }

    /// Shares the store of `self` but sleeps `delay` before every call.
    pub fn slowed(&self, delay: Duration) -> Self {
        Self {
            inner: self.inner.clone(),
            calls: Arc::clone(&self.calls),
            delay,
            write_delay: delay,
        }
    }

    /// Shares the store of `self` but sleeps `delay` before saves and deletes.
    pub fn slowed_writes(&self, delay: Duration) -> Self {
        Self {
            write_delay: delay,
            ..self.slowed(Duration::ZERO)
        }
    }

    /// Inserts a product straight into the store, bypassing the counters.
    pub async fn seed(&self, product: Product) -> Product {
        self.inner.save(product).await.unwrap()
    }

    /// Reads a stored row, bypassing the counters.
    pub async fn seed_lookup(&self, id: ProductId) -> Product {
        self.inner.find_by_id(id).await.unwrap().unwrap()
    }

    async fn pause(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn delayed(&self, items: EntityStream<Product>) -> EntityStream<Product> {
        let delay = self.delay;
        stream::once(async move {
            tokio::time::sleep(delay).await;
            items
        })
        .flatten()
        .boxed()
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    fn find_all(&self) -> EntityStream<Product> {
        Calls::hit(&self.calls.find_all);
        self.delayed(self.inner.find_all())
    }

    fn find_all_by_type(&self, type_name: &str) -> EntityStream<Product> {
        Calls::hit(&self.calls.find_all_by_type);
        self.delayed(self.inner.find_all_by_type(type_name))
    }

    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        Calls::hit(&self.calls.find_by_id);
        Self::pause(self.delay).await;
        self.inner.find_by_id(id).await
    }

    async fn save(&self, product: Product) -> CatalogResult<Product> {
        Calls::hit(&self.calls.save);
        Self::pause(self.write_delay).await;
        self.inner.save(product).await
    }

    async fn delete_by_id(&self, id: ProductId) -> CatalogResult<()> {
        Calls::hit(&self.calls.delete_by_id);
        Self::pause(self.write_delay).await;
        self.inner.delete_by_id(id).await
    }
}

/// Product type repository that counts calls and can be slowed down.
pub struct MockProductTypeRepository {
    inner: InMemoryProductTypeRepository,
    pub calls: Arc<Calls>,
    delay: Duration,
}

impl MockProductTypeRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryProductTypeRepository::seeded(),
            calls: Arc::new(Calls::default()),
            delay: Duration::ZERO,
        }
    }

    pub fn slowed(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl ProductTypeRepository for MockProductTypeRepository {
    async fn find_by_id(&self, id: ProductTypeId) -> CatalogResult<Option<ProductType>> {
        Calls::hit(&self.calls.find_by_id);
        self.pause().await;
        self.inner.find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<ProductType>> {
        Calls::hit(&self.calls.find_by_name);
        self.pause().await;
        self.inner.find_by_name(name).await
    }

    fn find_all(&self) -> EntityStream<ProductType> {
        Calls::hit(&self.calls.find_all);
        self.inner.find_all()
    }
}
