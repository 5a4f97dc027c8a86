//! # Catalog Repository
//!
//! Persistence collaborator of the product catalog:
//!
//! ```text
//! ProductService / ProductTypeService
//!   ↓  Arc<dyn ProductRepository>, Arc<dyn ProductTypeRepository>
//! PgProductRepository, PgProductTypeRepository   (SQLx)
//!   ↓
//! PostgreSQL
//! ```
//!
//! Collection queries return `'static` streams so callers can move them
//! onto another executor.

#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod traits;

#[cfg(any(test, feature = "memory"))]
pub use memory::*;
pub use pool::*;
pub use postgres::*;
pub use traits::*;
