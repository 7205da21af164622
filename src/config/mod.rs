//! Application configuration.
//!
//! Aggregates configuration from all modules into a single Config struct
//! that can be loaded from YAML files or environment variables.

mod auth;
mod client;
mod server;
mod storage;

pub use auth::AuthConfig;
pub use client::ClientConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "solstore.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "SOLSTORE_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "SOLSTORE";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "SOLSTORE_LOG";
/// Environment variable for server port (overrides `server.port`).
pub const PORT_ENV_VAR: &str = "PORT";

use serde::Deserialize;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub storage: StorageConfig,
    /// Admin authentication configuration.
    pub auth: AuthConfig,
    /// Storefront client configuration.
    pub client: ClientConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `solstore.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    /// 5. `PORT` for the server port
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = config.try_deserialize()?;

        if let Ok(port) = std::env::var(PORT_ENV_VAR) {
            config.server.port = port
                .parse()
                .map_err(|e| format!("invalid {PORT_ENV_VAR} value {port:?}: {e}"))?;
        }

        Ok(config)
    }

    /// Create config for testing.
    pub fn for_test() -> Self {
        let mut config = Self::default();
        config.storage.path = ":memory:".to_string();
        config.auth.secret = "test-secret".to_string();
        config.auth.bcrypt_cost = 4;
        config
    }
}
