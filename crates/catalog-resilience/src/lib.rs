//! # Catalog Resilience
//!
//! Bounded-latency execution of downstream calls: every guarded call runs
//! on a dedicated worker pool under a deadline, and a missed deadline
//! surfaces as `CatalogError::ServiceTimeout`.

pub mod deadline;

pub use deadline::*;
