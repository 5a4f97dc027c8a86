//! # Catalog Service
//!
//! The cache-coherent lifecycle service of the product catalog.
//!
//! - [`ProductService`]: list, get, create, update and delete products,
//!   enforcing the open/close lifecycle and keeping the `products` cache
//!   consistent with every mutation.
//! - [`ProductTypeService`]: read-through resolver over the `productTypes`
//!   cache.
//! - [`cache`]: the entity cache both services share the shape of.
//!
//! Every repository call goes through a [`DeadlineGuard`](catalog_resilience::DeadlineGuard).

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod product_service;
pub mod product_type_service;

pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use product_type_service::*;
pub use r#impl::{ProductServiceImpl, ProductTypeServiceImpl};
