//! solstore-server: storefront HTTP API
//!
//! Serves the catalog, checkout, admin endpoints and uploaded images from a
//! single SQLite file, optionally alongside the built storefront client.
//!
//! ## Configuration
//! - `solstore.yaml`, `--config <path>` or SOLSTORE_CONFIG
//! - SOLSTORE__SECTION__KEY environment overrides (e.g. SOLSTORE__AUTH__SECRET)
//! - PORT: listen port
//! - SOLSTORE_LOG: tracing filter (default "info")

use tracing::{error, info};

use solstore::api::{router, serve};
use solstore::config::Config;
use solstore::utils::bootstrap::{build_app_state, init_tracing, parse_config_path, shutdown_signal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let config_path = parse_config_path();
    let config = Config::load(config_path.as_deref()).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e.to_string()
    })?;

    info!("Starting solstore-server");

    let state = build_app_state(&config).await?;
    let app = router(state, &config.server);

    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    info!(
        address = %config.server.bind_address(),
        static_dir = ?config.server.static_dir,
        "server bound"
    );

    serve(listener, app, shutdown_signal()).await
}
