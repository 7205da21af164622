use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status every order is created with. Nothing transitions it afterwards.
pub const DEFAULT_ORDER_STATUS: &str = "pending";

/// Line item frozen into an order at submission time.
///
/// Carries the product id, name and unit price as the customer saw them;
/// later catalog edits or deletions do not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub qty: u32,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub items: Vec<OrderItem>,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A validated order about to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub items: Vec<OrderItem>,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

impl Order {
    /// Sum of all line totals.
    pub fn total(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}
