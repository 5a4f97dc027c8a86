//! Product lifecycle service trait definition.

use crate::dto::{NewProductRequest, ProductResponse, UpdateProductRequest};
use async_trait::async_trait;
use catalog_core::{CatalogResult, ProductId};

/// Product lifecycle service.
///
/// Every mutation leaves the `products` cache consistent: collection
/// entries are cleared and the single-entity entry reflects the store.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Lists products, newest open date first with unopened products last.
    ///
    /// A blank `type_filter` is the same as none. An unknown type name
    /// yields an empty list.
    async fn list_products(&self, type_filter: Option<&str>) -> CatalogResult<Vec<ProductResponse>>;

    /// Gets a product by ID.
    async fn get_product(&self, id: ProductId) -> CatalogResult<ProductResponse>;

    /// Creates a product, opening it immediately when requested.
    async fn create_product(&self, request: NewProductRequest) -> CatalogResult<ProductResponse>;

    /// Applies a partial update, including an open/close intent.
    async fn update_product(&self, id: ProductId, request: UpdateProductRequest) -> CatalogResult<ProductResponse>;

    /// Deletes a product.
    async fn delete_product(&self, id: ProductId) -> CatalogResult<()>;
}
