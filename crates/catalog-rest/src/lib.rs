//! # Catalog REST
//!
//! Thin HTTP transport over the product lifecycle service: routing,
//! request validation, status mapping and the structured error body.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
