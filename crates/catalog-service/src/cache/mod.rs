//! Caching infrastructure for the service layer.
//!
//! Two independent namespaces exist: [`PRODUCTS_NAMESPACE`] holds single
//! products and list-query results, [`PRODUCT_TYPES_NAMESPACE`] holds
//! product types by id, by name and the full list.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::{MemoryCache, PRODUCTS_NAMESPACE, PRODUCT_TYPES_NAMESPACE};
