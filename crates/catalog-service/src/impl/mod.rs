//! Service implementations.

mod product_service_impl;
mod product_type_service_impl;

pub use product_service_impl::ProductServiceImpl;
pub use product_type_service_impl::ProductTypeServiceImpl;

#[cfg(test)]
pub(crate) mod test_support;
