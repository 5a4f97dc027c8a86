//! Repository trait definitions.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Product, ProductId, ProductType, ProductTypeId};
use futures::stream::BoxStream;

/// A stream of entities that owns everything it needs.
pub type EntityStream<T> = BoxStream<'static, CatalogResult<T>>;

/// Product repository trait.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Streams every product, newest open date first, unopened products last.
    fn find_all(&self) -> EntityStream<Product>;

    /// Same ordering as [`find_all`](Self::find_all), restricted to a product type name.
    fn find_all_by_type(&self, type_name: &str) -> EntityStream<Product>;

    /// Finds a product by ID.
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    /// Inserts the product when it has no id, updates it otherwise.
    ///
    /// Returns the stored entity with its id populated.
    async fn save(&self, product: Product) -> CatalogResult<Product>;

    /// Deletes a product by ID.
    async fn delete_by_id(&self, id: ProductId) -> CatalogResult<()>;
}

/// Product type repository trait. Product types are read-only.
#[async_trait]
pub trait ProductTypeRepository: Send + Sync {
    /// Finds a product type by ID.
    async fn find_by_id(&self, id: ProductTypeId) -> CatalogResult<Option<ProductType>>;

    /// Finds a product type by its unique name.
    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<ProductType>>;

    /// Streams every product type ordered by id.
    fn find_all(&self) -> EntityStream<ProductType>;
}
