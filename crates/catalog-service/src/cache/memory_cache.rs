//! In-process cache implementation backed by `moka`.

use super::CacheInterface;
use async_trait::async_trait;
use catalog_config::CacheConfig;
use catalog_core::CatalogResult;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

/// Namespace of products by id and product list queries.
pub const PRODUCTS_NAMESPACE: &str = "products";

/// Namespace of product types by id, by name and the full list.
pub const PRODUCT_TYPES_NAMESPACE: &str = "productTypes";

/// One cache namespace with a fixed time-to-live from write.
#[derive(Clone)]
pub struct MemoryCache {
    namespace: String,
    entries: Cache<String, String>,
}

impl MemoryCache {
    /// Creates a namespace whose entries expire `ttl` after they were written.
    #[must_use]
    pub fn new(namespace: impl Into<String>, ttl: Duration, max_capacity: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self {
            namespace: namespace.into(),
            entries,
        }
    }

    /// Creates a namespace from configuration.
    #[must_use]
    pub fn from_config(namespace: impl Into<String>, config: &CacheConfig) -> Self {
        Self::new(namespace, config.ttl(), config.max_capacity)
    }
}

#[async_trait]
impl CacheInterface for MemoryCache {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        let value = self.entries.get(key).await;

        match &value {
            Some(_) => debug!(namespace = %self.namespace, "Cache hit for key '{}'", key),
            None => debug!(namespace = %self.namespace, "Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn put_raw(&self, key: &str, value: String) -> CatalogResult<()> {
        self.entries.insert(key.to_string(), value).await;
        debug!(namespace = %self.namespace, "Cached key '{}'", key);
        Ok(())
    }

    async fn evict(&self, key: &str) -> CatalogResult<()> {
        self.entries.invalidate(key).await;
        debug!(namespace = %self.namespace, "Evicted key '{}'", key);
        Ok(())
    }

    async fn clear(&self) -> CatalogResult<()> {
        // Entries inserted after this call are kept.
        self.entries.invalidate_all();
        debug!(namespace = %self.namespace, "Cleared namespace");
        Ok(())
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
