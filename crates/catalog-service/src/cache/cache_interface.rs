//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use catalog_core::CatalogResult;

/// Cache interface for storing and retrieving cached data.
///
/// One instance is one namespace. Values are stored as JSON strings so a
/// namespace can hold single entities and collections side by side while
/// the trait stays dyn-compatible. Every entry expires a fixed time after
/// it was written.
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Name of the namespace, for logging.
    fn namespace(&self) -> &str;

    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>>;

    /// Unconditionally store a raw JSON value.
    async fn put_raw(&self, key: &str, value: String) -> CatalogResult<()>;

    /// Remove one entry. No-op if absent.
    async fn evict(&self, key: &str) -> CatalogResult<()>;

    /// Remove every entry of the namespace.
    async fn clear(&self) -> CatalogResult<()>;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> CatalogResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Store a typed value, overwriting any previous entry.
    async fn put<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T) -> CatalogResult<()> {
        let json = serde_json::to_string(value)?;
        self.put_raw(key, json).await
    }

    /// Get a value, or compute it with `supplier` and cache it on a miss.
    ///
    /// Failures of the supplier are returned as-is and never cached.
    /// Concurrent misses on the same key are not deduplicated: each caller
    /// runs its own supplier and the last write wins.
    async fn get_or_compute<T, F, Fut>(&self, key: &str, supplier: F) -> CatalogResult<T>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: std::future::Future<Output = CatalogResult<T>> + Send,
    {
        if let Some(cached) = self.get::<T>(key).await? {
            return Ok(cached);
        }

        let value = supplier().await?;

        // Cache it (ignore errors as the value is still valid)
        let _ = self.put(key, &value).await;

        Ok(value)
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
