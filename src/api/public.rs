//! Unauthenticated routes: health, catalog, checkout and admin login.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiError, AppState};
use crate::model::{NewOrder, OrderItem, Product};

#[derive(Serialize)]
pub struct HealthResponse {
    ok: bool,
    time: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.list().await?))
}

/// Checkout body. Every field is optional on the wire so absence maps to a
/// validation error instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    items: Option<Vec<OrderItem>>,
    customer_name: Option<String>,
    address: Option<String>,
    phone: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    order_id: i64,
}

impl PlaceOrderRequest {
    fn validate(self) -> Result<NewOrder, ApiError> {
        let items = self.items.filter(|items| !items.is_empty());
        match (
            items,
            non_blank(self.customer_name),
            non_blank(self.address),
            non_blank(self.phone),
        ) {
            (Some(items), Some(customer_name), Some(address), Some(phone)) => Ok(NewOrder {
                items,
                customer_name,
                address,
                phone,
            }),
            _ => Err(ApiError::missing_fields()),
        }
    }
}

pub async fn place_order(
    State(state): State<AppState>,
    body: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<Json<PlaceOrderResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    let order = request.validate()?;
    let line_count = order.items.len();

    let order_id = state.orders.insert(order).await?;
    info!(order_id, lines = line_count, "order placed");

    Ok(Json(PlaceOrderResponse { order_id }))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    token: String,
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    let token = state.auth.login(&request.username, &request.password).await?;
    Ok(Json(LoginResponse { token }))
}

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
