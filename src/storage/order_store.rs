//! OrderStore trait definition.

use async_trait::async_trait;

use super::Result;
use crate::model::{NewOrder, Order};

/// Persistence for placed orders.
///
/// Orders are append-only here: there is no update or delete.
#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// Persist an order with status `pending` and the current time.
    /// Returns the new order id, which is never reused.
    async fn insert(&self, order: NewOrder) -> Result<i64>;

    /// All orders, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Order>>;
}
