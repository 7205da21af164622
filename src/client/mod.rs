//! Storefront client: API access plus the view-state controller that drives
//! browsing, the cart, checkout and the admin dashboard.

mod cart;
mod catalog;
mod http;
mod poller;
mod storefront;

pub use cart::{Cart, CartLine};
pub use catalog::{resolve_image_src, sample_products};
pub use http::{ContactForm, HealthStatus, ImageUpload, ProductDraft, StoreClient};
pub use poller::{
    OrderPoller, OrdersBoard, PollSettings, SharedOrdersBoard, MIN_POLL_INTERVAL, ORDERS_FETCH_FAILED,
};
pub use storefront::{AdminSession, LastOrder, OrderStatus, Storefront, View, SAMPLES_FALLBACK_MESSAGE};

/// Errors from talking to the storefront API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the server's error text when it sent one.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Decode(serde_json::Error),
}

impl ClientError {
    /// Message to show a user: the server's own text, or `fallback` when the
    /// request never produced one.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Server { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
