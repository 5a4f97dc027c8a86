//! Product type resolver trait definition.

use async_trait::async_trait;
use catalog_core::{CatalogResult, ProductType, ProductTypeId};

/// Cached, read-only lookups of product types.
#[async_trait]
pub trait ProductTypeService: Send + Sync {
    /// Gets a product type by ID.
    async fn get_product_type(&self, id: ProductTypeId) -> CatalogResult<ProductType>;

    /// Gets a product type by its unique name.
    async fn get_product_type_by_name(&self, name: &str) -> CatalogResult<ProductType>;

    /// Lists every product type ordered by ID.
    async fn list_product_types(&self) -> CatalogResult<Vec<ProductType>>;
}
