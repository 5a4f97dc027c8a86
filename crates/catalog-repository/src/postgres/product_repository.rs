//! PostgreSQL product repository implementation.

use super::rows_to_stream;
use crate::{EntityStream, ProductRepository};
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, Product, ProductId, ProductTypeId};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use tracing::debug;

const SELECT_PRODUCT: &str = r#"
    SELECT p.product_id, p.name, p.product_type_id, p.description,
           p.open_date, p.close_date,
           p.create_time, p.create_user, p.last_modify_time, p.last_modify_user
    FROM product p
    LEFT JOIN product_type pt ON p.product_type_id = pt.product_type_id
"#;

const ORDER_BY_OPEN_DATE: &str = "ORDER BY p.open_date DESC NULLS LAST, p.product_id";

const RETURNING_PRODUCT: &str = r#"
    RETURNING product_id, name, product_type_id, description, open_date, close_date,
              create_time, create_user, last_modify_time, last_modify_user
"#;

/// PostgreSQL product repository implementation.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Creates a new PostgreSQL product repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, product: Product) -> CatalogResult<Product> {
        let sql = format!(
            r#"
            INSERT INTO product (name, product_type_id, description, open_date, close_date,
                                 create_time, create_user, last_modify_time, last_modify_user)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            {RETURNING_PRODUCT}
            "#
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&product.name)
            .bind(product.product_type_id.into_inner())
            .bind(&product.description)
            .bind(product.open_date)
            .bind(product.close_date)
            .bind(product.create_time)
            .bind(&product.create_user)
            .bind(product.last_modify_time)
            .bind(&product.last_modify_user)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn update(&self, id: ProductId, product: Product) -> CatalogResult<Product> {
        // product_type_id is immutable after creation
        let sql = format!(
            r#"
            UPDATE product
            SET name = $2, description = $3, open_date = $4, close_date = $5,
                last_modify_time = $6, last_modify_user = $7
            WHERE product_id = $1
            {RETURNING_PRODUCT}
            "#
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.into_inner())
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.open_date)
            .bind(product.close_date)
            .bind(product.last_modify_time)
            .bind(&product.last_modify_user)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::from)
            .ok_or_else(|| CatalogError::not_found("Product", format!("id={}", id)))
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    product_id: i64,
    name: String,
    product_type_id: i64,
    description: String,
    open_date: Option<DateTime<Utc>>,
    close_date: Option<DateTime<Utc>>,
    create_time: DateTime<Utc>,
    create_user: String,
    last_modify_time: DateTime<Utc>,
    last_modify_user: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: Some(ProductId(row.product_id)),
            name: row.name,
            product_type_id: ProductTypeId(row.product_type_id),
            description: row.description,
            open_date: row.open_date,
            close_date: row.close_date,
            create_time: row.create_time,
            create_user: row.create_user,
            last_modify_time: row.last_modify_time,
            last_modify_user: row.last_modify_user,
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    fn find_all(&self) -> EntityStream<Product> {
        debug!("Finding all products");

        let pool = self.pool.clone();
        rows_to_stream::<_, ProductRow, Product>(async move {
            let sql = format!("{SELECT_PRODUCT} {ORDER_BY_OPEN_DATE}");
            sqlx::query_as::<_, ProductRow>(&sql).fetch_all(&pool).await
        })
    }

    fn find_all_by_type(&self, type_name: &str) -> EntityStream<Product> {
        debug!("Finding products by type: {}", type_name);

        let pool = self.pool.clone();
        let type_name = type_name.to_string();
        rows_to_stream::<_, ProductRow, Product>(async move {
            let sql = format!("{SELECT_PRODUCT} WHERE pt.name = $1 {ORDER_BY_OPEN_DATE}");
            sqlx::query_as::<_, ProductRow>(&sql)
                .bind(type_name)
                .fetch_all(&pool)
                .await
        })
    }

    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let sql = format!("{SELECT_PRODUCT} WHERE p.product_id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    async fn save(&self, product: Product) -> CatalogResult<Product> {
        match product.id {
            None => {
                debug!("Inserting product: {}", product.name);
                self.insert(product).await
            }
            Some(id) => {
                debug!("Updating product: {}", id);
                self.update(id, product).await
            }
        }
    }

    async fn delete_by_id(&self, id: ProductId) -> CatalogResult<()> {
        debug!("Deleting product: {}", id);

        sqlx::query("DELETE FROM product WHERE product_id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
