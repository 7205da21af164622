//! Storage for products, orders and admin credentials.
//!
//! Each record collection sits behind its own async trait so the API layer
//! never touches SQL. The SQLite implementations share one connection pool.

use std::sync::Arc;

use tracing::info;

use crate::config::StorageConfig;

mod admin_store;
mod order_store;
mod product_store;
pub mod schema;
pub mod sqlite;

pub use admin_store::AdminStore;
pub use order_store::OrderStore;
pub use product_store::ProductStore;
pub use sqlite::{SqliteAdminStore, SqliteOrderStore, SqliteProductStore};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid timestamp {value:?}")]
    InvalidTimestamp { value: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// The three stores the application runs on.
#[derive(Clone)]
pub struct Stores {
    pub products: Arc<dyn ProductStore>,
    pub orders: Arc<dyn OrderStore>,
    pub admins: Arc<dyn AdminStore>,
}

/// Open the configured database and make sure every table exists.
pub async fn init_storage(config: &StorageConfig) -> Result<Stores> {
    info!(path = %config.path, "opening storefront database");

    let pool = sqlite::connect(config).await?;

    let products = Arc::new(SqliteProductStore::new(pool.clone()));
    products.init().await?;

    let orders = Arc::new(SqliteOrderStore::new(pool.clone()));
    orders.init().await?;

    let admins = Arc::new(SqliteAdminStore::new(pool));
    admins.init().await?;

    Ok(Stores {
        products,
        orders,
        admins,
    })
}
