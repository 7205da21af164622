//! SQLite implementation of AdminStore.

use async_trait::async_trait;
use sea_query::{Expr, Func, OnConflict, Order as SortOrder, Query, SqliteQueryBuilder};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::model::AdminCredential;
use crate::storage::schema::{Admin, CREATE_ADMIN_TABLE};
use crate::storage::{AdminStore, Result};

/// SQLite-backed admin credential store.
pub struct SqliteAdminStore {
    pool: SqlitePool,
}

impl SqliteAdminStore {
    /// Create a new SQLite admin store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_ADMIN_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    fn from_row(row: &SqliteRow) -> Result<AdminCredential> {
        Ok(AdminCredential {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password")?,
        })
    }
}

#[async_trait]
impl AdminStore for SqliteAdminStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminCredential>> {
        let query = Query::select()
            .columns([Admin::Id, Admin::Username, Admin::Password])
            .from(Admin::Table)
            .and_where(Expr::col(Admin::Username).eq(username))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn count(&self) -> Result<i64> {
        let query = Query::select()
            .expr(Func::count(Expr::col(Admin::Id)))
            .from(Admin::Table)
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_one(&self.pool).await?;
        Ok(row.try_get(0)?)
    }

    async fn upsert(&self, username: &str, password_hash: &str) -> Result<()> {
        let query = Query::insert()
            .into_table(Admin::Table)
            .columns([Admin::Username, Admin::Password])
            .values_panic([username.into(), password_hash.into()])
            .on_conflict(
                OnConflict::column(Admin::Username)
                    .update_column(Admin::Password)
                    .to_owned(),
            )
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(&self.pool).await?;
        Ok(())
    }

    async fn delete(&self, username: &str) -> Result<u64> {
        let query = Query::delete()
            .from_table(Admin::Table)
            .and_where(Expr::col(Admin::Username).eq(username))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn list(&self) -> Result<Vec<AdminCredential>> {
        let query = Query::select()
            .columns([Admin::Id, Admin::Username, Admin::Password])
            .from(Admin::Table)
            .order_by(Admin::Id, SortOrder::Asc)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(Self::from_row).collect()
    }
}
