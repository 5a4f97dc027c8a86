//! PostgreSQL product type repository implementation.

use super::rows_to_stream;
use crate::{EntityStream, ProductTypeRepository};
use async_trait::async_trait;
use catalog_core::{CatalogResult, ProductType, ProductTypeId};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use tracing::debug;

const SELECT_PRODUCT_TYPE: &str = r#"
    SELECT product_type_id, name, description,
           create_time, create_user, last_modify_time, last_modify_user
    FROM product_type
"#;

/// PostgreSQL product type repository implementation.
#[derive(Clone)]
pub struct PgProductTypeRepository {
    pool: PgPool,
}

impl PgProductTypeRepository {
    /// Creates a new PostgreSQL product type repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductTypeRow {
    product_type_id: i64,
    name: String,
    description: String,
    create_time: DateTime<Utc>,
    create_user: String,
    last_modify_time: DateTime<Utc>,
    last_modify_user: String,
}

impl From<ProductTypeRow> for ProductType {
    fn from(row: ProductTypeRow) -> Self {
        ProductType {
            id: ProductTypeId(row.product_type_id),
            name: row.name,
            description: row.description,
            create_time: row.create_time,
            create_user: row.create_user,
            last_modify_time: row.last_modify_time,
            last_modify_user: row.last_modify_user,
        }
    }
}

#[async_trait]
impl ProductTypeRepository for PgProductTypeRepository {
    async fn find_by_id(&self, id: ProductTypeId) -> CatalogResult<Option<ProductType>> {
        debug!("Finding product type by id: {}", id);

        let sql = format!("{SELECT_PRODUCT_TYPE} WHERE product_type_id = $1");
        let row = sqlx::query_as::<_, ProductTypeRow>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ProductType::from))
    }

    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<ProductType>> {
        debug!("Finding product type by name: {}", name);

        let sql = format!("{SELECT_PRODUCT_TYPE} WHERE name = $1");
        let row = sqlx::query_as::<_, ProductTypeRow>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ProductType::from))
    }

    fn find_all(&self) -> EntityStream<ProductType> {
        debug!("Finding all product types");

        let pool = self.pool.clone();
        rows_to_stream::<_, ProductTypeRow, ProductType>(async move {
            let sql = format!("{SELECT_PRODUCT_TYPE} ORDER BY product_type_id");
            sqlx::query_as::<_, ProductTypeRow>(&sql).fetch_all(&pool).await
        })
    }
}
