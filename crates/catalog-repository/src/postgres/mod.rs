//! PostgreSQL repository implementations.

mod product_repository;
mod product_type_repository;

pub use product_repository::PgProductRepository;
pub use product_type_repository::PgProductTypeRepository;

use crate::EntityStream;
use catalog_core::{CatalogError, CatalogResult};
use futures::{stream, StreamExt, TryStreamExt};
use std::future::Future;

/// Turns a `fetch_all` future into an owned entity stream.
fn rows_to_stream<F, R, T>(fetch: F) -> EntityStream<T>
where
    F: Future<Output = Result<Vec<R>, sqlx::Error>> + Send + 'static,
    R: Into<T> + Send + 'static,
    T: Send + 'static,
{
    stream::once(fetch)
        .map_err(CatalogError::from)
        .map_ok(|rows| stream::iter(rows.into_iter().map(|row| CatalogResult::Ok(row.into()))))
        .try_flatten()
        .boxed()
}
