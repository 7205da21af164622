//! AdminStore trait definition.

use async_trait::async_trait;

use super::Result;
use crate::model::AdminCredential;

/// Persistence for admin credentials.
#[async_trait]
pub trait AdminStore: Send + Sync + 'static {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminCredential>>;

    /// Number of stored credentials.
    async fn count(&self) -> Result<i64>;

    /// Create the credential, or replace the hash of an existing username.
    async fn upsert(&self, username: &str, password_hash: &str) -> Result<()>;

    /// Remove a credential. Returns rows removed.
    async fn delete(&self, username: &str) -> Result<u64>;

    /// All credentials ordered by id.
    async fn list(&self) -> Result<Vec<AdminCredential>>;
}
