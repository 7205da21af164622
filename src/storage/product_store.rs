//! ProductStore trait definition.

use async_trait::async_trait;

use super::Result;
use crate::model::{NewProduct, Product, ProductUpdate};

/// Persistence for the product catalog.
#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
    /// Every stored product, in insertion order.
    async fn list(&self) -> Result<Vec<Product>>;

    /// Insert a product and return its new id.
    async fn insert(&self, product: NewProduct) -> Result<i64>;

    /// Replace name, description, price and stock. Returns rows changed.
    async fn update(&self, id: i64, update: ProductUpdate) -> Result<u64>;

    /// Delete by id. Returns rows removed; an unknown id yields zero.
    async fn delete(&self, id: i64) -> Result<u64>;
}
