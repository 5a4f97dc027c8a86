//! HTTP middleware.

mod error_body;
mod logging;

pub use error_body::*;
pub use logging::*;
