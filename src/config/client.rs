//! Storefront client configuration types.

use std::time::Duration;

use serde::Deserialize;

/// Storefront client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the storefront API.
    pub base_url: String,
    /// Interval between background order refreshes on the admin dashboard.
    pub poll_interval_ms: u64,
    /// Consecutive poll failures before the dashboard shows an error.
    pub poll_failure_threshold: u32,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            poll_interval_ms: 6_000,
            poll_failure_threshold: 3,
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Poll interval as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let client = ClientConfig::default();
        assert_eq!(client.base_url, "http://localhost:5000");
        assert_eq!(client.poll_interval(), Duration::from_secs(6));
        assert_eq!(client.poll_failure_threshold, 3);
    }
}
