//! Data Transfer Objects (DTOs).

mod product_dto;
mod product_type_dto;

pub use product_dto::*;
pub use product_type_dto::*;
