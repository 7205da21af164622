//! Client-held shopping cart. Never persisted.

use crate::model::{OrderItem, Product};

/// One product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub qty: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.qty)
    }
}

/// Ordered list of cart lines, one per product id.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.
    ///
    /// The product's price is captured on first add. Returns false for
    /// products with no stock.
    pub fn add(&mut self, product: &Product) -> bool {
        if !product.in_stock() {
            return false;
        }

        match self.line_mut(product.id) {
            Some(line) => line.qty += 1,
            None => self.lines.push(CartLine {
                product: product.clone(),
                qty: 1,
            }),
        }
        true
    }

    /// Add one unit to an existing line.
    pub fn increment(&mut self, product_id: i64) -> bool {
        match self.line_mut(product_id) {
            Some(line) => {
                line.qty += 1;
                true
            }
            None => false,
        }
    }

    /// Remove one unit; a line reaching zero is dropped.
    pub fn decrement(&mut self, product_id: i64) {
        if let Some(line) = self.line_mut(product_id) {
            line.qty = line.qty.saturating_sub(1);
        }
        self.lines.retain(|line| line.qty > 0);
    }

    pub fn remove(&mut self, product_id: i64) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.qty).sum()
    }

    /// Sum of price times quantity.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Snapshot of the cart as order line items.
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .map(|line| OrderItem {
                id: line.product.id,
                name: line.product.name.clone(),
                price: line.product.price,
                qty: line.qty,
            })
            .collect()
    }

    fn line_mut(&mut self, product_id: i64) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }
}
