//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query building.
//! Table and column names follow the legacy `store.db` layout, so existing
//! database files open unchanged.

use sea_query::Iden;

/// Products table schema.
#[derive(Iden)]
pub enum Products {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "name"]
    Name,
    #[iden = "description"]
    Description,
    #[iden = "price"]
    Price,
    #[iden = "stock"]
    Stock,
    #[iden = "image"]
    Image,
}

/// Orders table schema.
///
/// `items` holds the line item snapshot as a JSON array.
#[derive(Iden)]
pub enum Orders {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "items"]
    Items,
    #[iden = "customer_name"]
    CustomerName,
    #[iden = "address"]
    Address,
    #[iden = "phone"]
    Phone,
    #[iden = "status"]
    Status,
    #[iden = "created_at"]
    CreatedAt,
}

/// Admin credentials table schema.
#[derive(Iden)]
pub enum Admin {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "username"]
    Username,
    /// bcrypt hash, never the plain password.
    #[iden = "password"]
    Password,
}

/// SQL for creating the products table.
pub const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    price REAL NOT NULL,
    stock INTEGER NOT NULL DEFAULT 0,
    image TEXT
)
"#;

/// SQL for creating the orders table.
pub const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    items TEXT NOT NULL,
    customer_name TEXT NOT NULL,
    address TEXT NOT NULL,
    phone TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL for creating the admin table.
pub const CREATE_ADMIN_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS admin (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
)
"#;
