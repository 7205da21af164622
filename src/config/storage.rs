//! Storage configuration types.

use serde::Deserialize;

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file path. `:memory:` keeps everything in process.
    pub path: String,
    /// Maximum pooled connections (forced to 1 for in-memory databases).
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "store.db".to_string(),
            max_connections: 5,
        }
    }
}

impl StorageConfig {
    /// Whether the database lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
