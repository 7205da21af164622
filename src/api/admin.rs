//! Admin routes. Every handler here sits behind `require_admin`.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Extension, Multipart, Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::public::non_blank;
use super::{ApiError, AppState};
use crate::model::{AdminIdentity, NewProduct, Order, ProductUpdate};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductResponse {
    product_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductResponse {
    deleted_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductResponse {
    updated_count: u64,
}

/// Raw product fields before validation, shared by add and update.
#[derive(Debug, Default)]
struct ProductFields {
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
    stock: Option<String>,
}

impl ProductFields {
    fn validate(self) -> Result<ProductUpdate, ApiError> {
        let (Some(name), Some(price), Some(stock)) = (
            non_blank(self.name),
            non_blank(self.price),
            non_blank(self.stock),
        ) else {
            return Err(ApiError::missing_fields());
        };

        let price = price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| ApiError::Validation("Invalid price".to_string()))?;
        let stock = stock
            .parse::<i64>()
            .ok()
            .filter(|s| *s >= 0)
            .ok_or_else(|| ApiError::Validation("Invalid stock".to_string()))?;

        Ok(ProductUpdate {
            name,
            description: non_blank(self.description),
            price,
            stock,
        })
    }
}

/// Uploaded image part, held in memory until the text fields validate.
struct ImagePart {
    file_name: Option<String>,
    bytes: Vec<u8>,
}

pub async fn add_product(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AddProductResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::Validation(e.body_text()))?;

    let mut fields = ProductFields::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(e.body_text()))?;
                // An empty part is a file input with nothing chosen
                if !bytes.is_empty() {
                    image = Some(ImagePart {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            "name" | "description" | "price" | "stock" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(e.body_text()))?;
                let slot = match name.as_str() {
                    "name" => &mut fields.name,
                    "description" => &mut fields.description,
                    "price" => &mut fields.price,
                    _ => &mut fields.stock,
                };
                *slot = Some(text);
            }
            _ => {}
        }
    }

    let product = fields.validate()?;

    let image = match image {
        Some(part) => Some(
            state
                .uploads
                .save(part.file_name.as_deref(), &part.bytes)
                .await?,
        ),
        None => None,
    };

    let product_id = state
        .products
        .insert(NewProduct {
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            image,
        })
        .await?;

    info!(product_id, admin = %admin.username, "product added");
    Ok(Json(AddProductResponse { product_id }))
}

/// JSON body for product edits. Price and stock may arrive as numbers or strings.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    name: Option<String>,
    description: Option<String>,
    price: Option<serde_json::Value>,
    stock: Option<serde_json::Value>,
}

fn scalar_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<UpdateProductResponse>, ApiError> {
    let Path(id) = id.map_err(|_| invalid_id())?;
    let Json(request) = body.map_err(|e| ApiError::Validation(e.body_text()))?;

    let update = ProductFields {
        name: request.name,
        description: request.description,
        price: scalar_text(request.price),
        stock: scalar_text(request.stock),
    }
    .validate()?;

    let updated_count = state.products.update(id, update).await?;
    info!(product_id = id, updated_count, admin = %admin.username, "product updated");

    Ok(Json(UpdateProductResponse { updated_count }))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteProductResponse>, ApiError> {
    let Path(id) = id.map_err(|_| invalid_id())?;

    let deleted_count = state.products.delete(id).await?;
    info!(product_id = id, deleted_count, admin = %admin.username, "product deleted");

    Ok(Json(DeleteProductResponse { deleted_count }))
}

pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list_newest_first().await?))
}

fn invalid_id() -> ApiError {
    ApiError::Validation("Invalid product id".to_string())
}
