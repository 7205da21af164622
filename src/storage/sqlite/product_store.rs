//! SQLite implementation of ProductStore.

use async_trait::async_trait;
use sea_query::{Expr, Order as SortOrder, Query, SqliteQueryBuilder};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::model::{NewProduct, Product, ProductUpdate};
use crate::storage::schema::{Products, CREATE_PRODUCTS_TABLE};
use crate::storage::{ProductStore, Result};

/// SQLite-backed product catalog.
pub struct SqliteProductStore {
    pool: SqlitePool,
}

impl SqliteProductStore {
    /// Create a new SQLite product store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_PRODUCTS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn from_row(row: &SqliteRow) -> Result<Product> {
        Ok(Product {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            stock: row.try_get("stock")?,
            image: row.try_get("image")?,
        })
    }
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn list(&self) -> Result<Vec<Product>> {
        let query = Query::select()
            .columns([
                Products::Id,
                Products::Name,
                Products::Description,
                Products::Price,
                Products::Stock,
                Products::Image,
            ])
            .from(Products::Table)
            .order_by(Products::Id, SortOrder::Asc)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn insert(&self, product: NewProduct) -> Result<i64> {
        let query = Query::insert()
            .into_table(Products::Table)
            .columns([
                Products::Name,
                Products::Description,
                Products::Price,
                Products::Stock,
                Products::Image,
            ])
            .values_panic([
                product.name.into(),
                product.description.into(),
                product.price.into(),
                product.stock.into(),
                product.image.into(),
            ])
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, update: ProductUpdate) -> Result<u64> {
        let query = Query::update()
            .table(Products::Table)
            .values([
                (Products::Name, update.name.into()),
                (Products::Description, update.description.into()),
                (Products::Price, update.price.into()),
                (Products::Stock, update.stock.into()),
            ])
            .and_where(Expr::col(Products::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let query = Query::delete()
            .from_table(Products::Table)
            .and_where(Expr::col(Products::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
