//! Shared utilities for integration tests.
//!
//! Runs the real router on an ephemeral loopback port with an in-memory
//! database and a throwaway uploads directory.

use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::oneshot;

use solstore::api::{router, serve, AppState};
use solstore::client::{StoreClient, Storefront};
use solstore::config::{ClientConfig, Config};
use solstore::utils::bootstrap::build_app_state;

/// Seeded admin credentials.
pub const ADMIN_USERNAME: &str = "zahra00";
pub const ADMIN_PASSWORD: &str = "sol.pk";

/// A running server. Dropping it shuts the server down.
pub struct TestServer {
    pub base_url: String,
    pub state: AppState,
    _uploads: TempDir,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let uploads = tempfile::tempdir().expect("tempdir");
        let mut config = Config::for_test();
        config.server.uploads_dir = uploads.path().display().to_string();

        let state = build_app_state(&config).await.expect("app state");
        let app = router(state.clone(), &config.server);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let base_url = format!("http://{}", listener.local_addr().expect("addr"));

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            serve(listener, app, shutdown).await.expect("serve");
        });

        Self {
            base_url,
            state,
            _uploads: uploads,
            shutdown: Some(shutdown_tx),
        }
    }

    /// Client config pointing at this server with a fast poll interval.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            poll_interval_ms: 100,
            poll_failure_threshold: 2,
            request_timeout_secs: 5,
        }
    }

    pub fn client(&self) -> StoreClient {
        StoreClient::from_config(&self.client_config()).expect("client")
    }

    pub async fn storefront(&self) -> Storefront {
        Storefront::open(self.client(), &self.client_config()).await
    }

    pub async fn admin_token(&self) -> String {
        self.client()
            .login(ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .expect("admin login")
    }

    /// Stop accepting connections.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Poll `check` until it returns true or `timeout` elapses.
pub async fn eventually<F, Fut>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    false
}
