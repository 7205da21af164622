//! SQLite implementation of OrderStore.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use sea_query::{Order as SortOrder, Query, SqliteQueryBuilder};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::model::{NewOrder, Order, OrderItem, DEFAULT_ORDER_STATUS};
use crate::storage::schema::{Orders, CREATE_ORDERS_TABLE};
use crate::storage::{OrderStore, Result, StorageError};

/// SQLite-backed order log.
pub struct SqliteOrderStore {
    pool: SqlitePool,
}

impl SqliteOrderStore {
    /// Create a new SQLite order store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_ORDERS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    fn from_row(row: &SqliteRow) -> Result<Order> {
        let items: String = row.try_get("items")?;
        let items: Vec<OrderItem> = serde_json::from_str(&items)?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Order {
            id: row.try_get("id")?,
            items,
            customer_name: row.try_get("customer_name")?,
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
            status: row.try_get("status")?,
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

/// Parse a stored timestamp.
///
/// New rows hold RFC 3339 strings; rows written through the column default
/// hold SQLite's `CURRENT_TIMESTAMP` format, which is UTC without an offset.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| StorageError::InvalidTimestamp {
            value: value.to_string(),
        })
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<i64> {
        let items = serde_json::to_string(&order.items)?;
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let query = Query::insert()
            .into_table(Orders::Table)
            .columns([
                Orders::Items,
                Orders::CustomerName,
                Orders::Address,
                Orders::Phone,
                Orders::Status,
                Orders::CreatedAt,
            ])
            .values_panic([
                items.into(),
                order.customer_name.into(),
                order.address.into(),
                order.phone.into(),
                DEFAULT_ORDER_STATUS.into(),
                created_at.into(),
            ])
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        Ok(result.last_insert_rowid())
    }

    async fn list_newest_first(&self) -> Result<Vec<Order>> {
        // Millisecond timestamps can tie; ids break the tie in insertion order
        let query = Query::select()
            .columns([
                Orders::Id,
                Orders::Items,
                Orders::CustomerName,
                Orders::Address,
                Orders::Phone,
                Orders::Status,
                Orders::CreatedAt,
            ])
            .from(Orders::Table)
            .order_by(Orders::CreatedAt, SortOrder::Desc)
            .order_by(Orders::Id, SortOrder::Desc)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(Self::from_row).collect()
    }
}
