//! Storefront HTTP API.
//!
//! Routes:
//! - `GET /health`: liveness check
//! - `GET /api/products`: catalog
//! - `POST /api/orders`: checkout
//! - `POST /api/admin/login`: exchange credentials for a token
//! - `POST /api/admin/products`, `PUT|DELETE /api/admin/products/:id`,
//!   `GET /api/admin/orders`: bearer-token protected
//! - `GET /uploads/*`: stored product images
//!
//! When `server.static_dir` is set, everything else falls through to the
//! built client, with `index.html` for unknown paths.

mod admin;
mod error;
mod public;

pub use error::ApiError;

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::AuthGate;
use crate::config::ServerConfig;
use crate::storage::{OrderStore, ProductStore, Stores};
use crate::uploads::{UploadStore, UPLOADS_ROUTE};

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
    pub orders: Arc<dyn OrderStore>,
    pub auth: Arc<AuthGate>,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    pub fn new(stores: Stores, auth: AuthGate, uploads: UploadStore) -> Self {
        Self {
            products: stores.products,
            orders: stores.orders,
            auth: Arc::new(auth),
            uploads: Arc::new(uploads),
        }
    }
}

/// Build the axum router (separated for testing).
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin = Router::new()
        .route("/api/admin/products", post(admin::add_product))
        .route(
            "/api/admin/products/:id",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route("/api/admin/orders", get(admin::list_orders))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let mut app = Router::new()
        .route("/health", get(public::health))
        .route("/api/products", get(public::list_products))
        .route("/api/orders", post(public::place_order))
        .route("/api/admin/login", post(public::login))
        .merge(admin)
        .nest_service(UPLOADS_ROUTE, ServeDir::new(state.uploads.dir()));

    if let Some(static_dir) = &config.static_dir {
        let index = Path::new(static_dir).join("index.html");
        app = app.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)));
    }

    app.layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve the router until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "storefront API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("storefront API stopped");
    Ok(())
}

/// Reject requests without a valid admin token before any body is read.
///
/// A missing `Authorization` header is 401; anything present but unusable is 403.
async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request.headers().get(AUTHORIZATION).map(|value| {
        value
            .to_str()
            .ok()
            .and_then(|v| v.split_once(' '))
            .map(|(_, token)| token.trim())
            .unwrap_or_default()
    });

    let identity = state.auth.verify(token)?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
