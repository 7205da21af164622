//! Bootstrap utilities for solstore binaries.
//!
//! Shared initialization code for the server and maintenance binaries.

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::AppState;
use crate::auth::AuthGate;
use crate::config::{Config, LOG_ENV_VAR};
use crate::storage::init_storage;
use crate::uploads::UploadStore;

/// Initialize tracing with the SOLSTORE_LOG environment variable.
///
/// Defaults to "info" level if SOLSTORE_LOG is not set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Read `--config <path>` or `--config=<path>` from the process arguments.
pub fn parse_config_path() -> Option<String> {
    config_path_from(std::env::args().skip(1))
}

fn config_path_from(args: impl IntoIterator<Item = String>) -> Option<String> {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--config" || arg == "-c" {
            return args.next();
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(path.to_string());
        }
    }
    None
}

/// Open storage, seed the admin credential and prepare the uploads directory.
pub async fn build_app_state(
    config: &Config,
) -> Result<AppState, Box<dyn std::error::Error + Send + Sync>> {
    let stores = init_storage(&config.storage).await?;
    info!(path = %config.storage.path, "storage initialized");

    let auth = AuthGate::from_config(stores.admins.clone(), &config.auth);
    let seeded = auth
        .ensure_seed_admin(&config.auth.seed_username, &config.auth.seed_password)
        .await?;
    info!(seeded, username = %config.auth.seed_username, "admin credentials ready");

    let uploads = UploadStore::new(&config.server.uploads_dir);
    uploads.init().await?;
    info!(dir = %uploads.dir().display(), "uploads directory ready");

    Ok(AppState::new(stores, auth, uploads))
}

/// Resolve on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
