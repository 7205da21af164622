use serde::{Deserialize, Serialize};

/// A catalog product as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    /// Uploaded filename, absolute URL, or root-relative path.
    pub image: Option<String>,
}

/// Fields for a product about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub image: Option<String>,
}

/// Full replacement of a product's mutable fields. The image is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
}

impl Product {
    /// Whether the product can still be added to a cart.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
