//! # Catalog Server Library
//!
//! Component wiring, logging and startup of the product catalog server.

pub mod app;
pub mod components;
pub mod logging;
pub mod startup;
