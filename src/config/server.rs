//! HTTP server configuration types.

use serde::Deserialize;

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port for the HTTP API.
    pub port: u16,
    /// Directory uploaded product images are written to and served from.
    pub uploads_dir: String,
    /// Directory holding the built storefront client, served as a fallback.
    /// None = no static client serving.
    pub static_dir: Option<String>,
    /// Upper bound on request bodies, including multipart image uploads.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            uploads_dir: "uploads".to_string(),
            static_dir: None,
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
