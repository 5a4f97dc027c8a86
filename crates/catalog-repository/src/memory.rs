//! In-memory repositories with the same ordering and filtering rules as
//! the PostgreSQL ones.

use crate::{EntityStream, ProductRepository, ProductTypeRepository};
use async_trait::async_trait;
use catalog_core::{
    CatalogError, CatalogResult, Product, ProductId, ProductType, ProductTypeId, SYSTEM_USER,
};
use chrono::Utc;
use futures::{stream, StreamExt};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> CatalogResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| CatalogError::internal("In-memory store lock poisoned"))
}

fn to_stream<T: Send + 'static>(items: CatalogResult<Vec<T>>) -> EntityStream<T> {
    match items {
        Ok(items) => stream::iter(items.into_iter().map(Ok)).boxed(),
        Err(e) => stream::once(async move { Err(e) }).boxed(),
    }
}

/// The reference product types: `card` (1), `credit` (2) and `deposit` (3).
#[must_use]
pub fn seed_product_types() -> Vec<ProductType> {
    let now = Utc::now();
    [("card", "Payment cards"), ("credit", "Credit products"), ("deposit", "Deposit products")]
        .into_iter()
        .zip(1..)
        .map(|((name, description), id)| ProductType {
            id: ProductTypeId(id),
            name: name.to_string(),
            description: description.to_string(),
            create_time: now,
            create_user: SYSTEM_USER.to_string(),
            last_modify_time: now,
            last_modify_user: SYSTEM_USER.to_string(),
        })
        .collect()
}

/// In-memory product type repository.
#[derive(Debug, Clone)]
pub struct InMemoryProductTypeRepository {
    types: Arc<Vec<ProductType>>,
}

impl InMemoryProductTypeRepository {
    #[must_use]
    pub fn new(types: Vec<ProductType>) -> Self {
        Self {
            types: Arc::new(types),
        }
    }

    /// Repository holding [`seed_product_types`].
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed_product_types())
    }

    fn name_of(&self, id: ProductTypeId) -> Option<&str> {
        self.types.iter().find(|t| t.id == id).map(|t| t.name.as_str())
    }
}

#[async_trait]
impl ProductTypeRepository for InMemoryProductTypeRepository {
    async fn find_by_id(&self, id: ProductTypeId) -> CatalogResult<Option<ProductType>> {
        Ok(self.types.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<ProductType>> {
        Ok(self.types.iter().find(|t| t.name == name).cloned())
    }

    fn find_all(&self) -> EntityStream<ProductType> {
        let mut types = self.types.as_ref().clone();
        types.sort_by_key(|t| t.id);
        to_stream(Ok(types))
    }
}

#[derive(Debug, Default)]
struct ProductStore {
    rows: BTreeMap<ProductId, Product>,
    last_id: i64,
}

/// In-memory product repository.
///
/// Ids are assigned sequentially from 1; type names are resolved against
/// the product types it was built with.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<Mutex<ProductStore>>,
    types: InMemoryProductTypeRepository,
}

impl InMemoryProductRepository {
    #[must_use]
    pub fn new(types: InMemoryProductTypeRepository) -> Self {
        Self {
            store: Arc::new(Mutex::new(ProductStore::default())),
            types,
        }
    }

    fn sorted(&self, type_name: Option<&str>) -> CatalogResult<Vec<Product>> {
        let store = lock(&self.store)?;
        let mut products: Vec<Product> = store
            .rows
            .values()
            .filter(|p| match type_name {
                Some(name) => self.types.name_of(p.product_type_id) == Some(name),
                None => true,
            })
            .cloned()
            .collect();
        // open_date DESC NULLS LAST, then id
        products.sort_by(|a, b| b.open_date.cmp(&a.open_date).then(a.id.cmp(&b.id)));
        Ok(products)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    fn find_all(&self) -> EntityStream<Product> {
        to_stream(self.sorted(None))
    }

    fn find_all_by_type(&self, type_name: &str) -> EntityStream<Product> {
        to_stream(self.sorted(Some(type_name)))
    }

    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        Ok(lock(&self.store)?.rows.get(&id).cloned())
    }

    async fn save(&self, mut product: Product) -> CatalogResult<Product> {
        let mut store = lock(&self.store)?;
        let id = match product.id {
            Some(id) if store.rows.contains_key(&id) => id,
            Some(id) => return Err(CatalogError::not_found("Product", format!("id={}", id))),
            None => {
                store.last_id += 1;
                ProductId(store.last_id)
            }
        };
        product.id = Some(id);
        store.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn delete_by_id(&self, id: ProductId) -> CatalogResult<()> {
        lock(&self.store)?.rows.remove(&id);
        Ok(())
    }
}
