//! Storefront records shared by the store, the API and the client.

mod admin;
mod order;
mod product;

pub use admin::{AdminCredential, AdminIdentity};
pub use order::{NewOrder, Order, OrderItem, DEFAULT_ORDER_STATUS};
pub use product::{NewProduct, Product, ProductUpdate};
