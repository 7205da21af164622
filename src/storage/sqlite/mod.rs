//! SQLite implementations of the storefront stores.

mod admin_store;
mod order_store;
mod product_store;

pub use admin_store::SqliteAdminStore;
pub use order_store::SqliteOrderStore;
pub use product_store::SqliteProductStore;

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use super::Result;
use crate::config::StorageConfig;

/// Open a connection pool for the configured database file.
///
/// In-memory databases are private to a connection, so they get a pool of
/// exactly one connection that is never recycled.
pub async fn connect(config: &StorageConfig) -> Result<SqlitePool> {
    if config.is_in_memory() {
        let opts = SqliteConnectOptions::new()
            .filename(":memory:")
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;

        return Ok(pool);
    }

    if let Some(parent) = Path::new(&config.path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let opts = SqliteConnectOptions::new()
        .filename(&config.path)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(30))
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(opts)
        .await?;

    Ok(pool)
}

/// In-memory pool for tests.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    connect(&StorageConfig {
        path: ":memory:".to_string(),
        max_connections: 1,
    })
    .await
    .expect("failed to create in-memory pool")
}
