//! Typed HTTP client for the storefront API.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ClientError;
use crate::config::ClientConfig;
use crate::model::{Order, OrderItem, Product, ProductUpdate};

/// Body of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub time: String,
}

/// Customer contact fields entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// An image file attached to a new product.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A product as entered in the admin form.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub image: Option<ImageUpload>,
}

#[derive(Serialize)]
struct CheckoutBody<'a> {
    items: &'a [OrderItem],
    customer_name: &'a str,
    address: &'a str,
    phone: &'a str,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderPlaced {
    order_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductAdded {
    product_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductsDeleted {
    deleted_count: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductsUpdated {
    updated_count: u64,
}

#[derive(Deserialize)]
struct TokenIssued {
    token: String,
}

/// Storefront API client.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
    base_url: String,
}

impl StoreClient {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>, config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client for the configured base URL.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(config.base_url.clone(), config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        send_json(self.client.get(self.url("/health"))).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        send_json(self.client.get(self.url("/api/products"))).await
    }

    /// Submit an order, returning its id.
    pub async fn place_order(
        &self,
        items: &[OrderItem],
        contact: &ContactForm,
    ) -> Result<i64, ClientError> {
        let body = CheckoutBody {
            items,
            customer_name: &contact.name,
            address: &contact.address,
            phone: &contact.phone,
        };

        let placed: OrderPlaced =
            send_json(self.client.post(self.url("/api/orders")).json(&body)).await?;
        Ok(placed.order_id)
    }

    /// Exchange admin credentials for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let body = LoginBody { username, password };
        let issued: TokenIssued =
            send_json(self.client.post(self.url("/api/admin/login")).json(&body)).await?;
        Ok(issued.token)
    }

    pub async fn add_product(&self, token: &str, draft: &ProductDraft) -> Result<i64, ClientError> {
        let mut form = Form::new()
            .text("name", draft.name.clone())
            .text("description", draft.description.clone().unwrap_or_default())
            .text("price", draft.price.to_string())
            .text("stock", draft.stock.to_string());

        if let Some(image) = &draft.image {
            form = form.part(
                "image",
                Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
            );
        }

        let added: ProductAdded = send_json(
            self.client
                .post(self.url("/api/admin/products"))
                .bearer_auth(token)
                .multipart(form),
        )
        .await?;
        Ok(added.product_id)
    }

    pub async fn update_product(
        &self,
        token: &str,
        id: i64,
        update: &ProductUpdate,
    ) -> Result<u64, ClientError> {
        let updated: ProductsUpdated = send_json(
            self.client
                .put(self.url(&format!("/api/admin/products/{id}")))
                .bearer_auth(token)
                .json(update),
        )
        .await?;
        Ok(updated.updated_count)
    }

    pub async fn delete_product(&self, token: &str, id: i64) -> Result<u64, ClientError> {
        let deleted: ProductsDeleted = send_json(
            self.client
                .delete(self.url(&format!("/api/admin/products/{id}")))
                .bearer_auth(token),
        )
        .await?;
        Ok(deleted.deleted_count)
    }

    /// All orders, newest first.
    pub async fn list_orders(&self, token: &str) -> Result<Vec<Order>, ClientError> {
        send_json(
            self.client
                .get(self.url("/api/admin/orders"))
                .bearer_auth(token),
        )
        .await
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;
    debug!(status = status.as_u16(), bytes = text.len(), "storefront response");

    if !status.is_success() {
        return Err(ClientError::Server {
            status: status.as_u16(),
            message: error_message(status, &text),
        });
    }

    serde_json::from_str(&text).map_err(ClientError::Decode)
}

/// The server's `{error}` field, else `HTTP <status>`. Non-JSON bodies are
/// surfaced as-is since they usually come from a proxy.
fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || format!("HTTP {}", status.as_u16());

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => json
            .get("error")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(fallback),
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => fallback(),
    }
}
