//! Background refresh of the admin order board.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{watch, RwLock};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::StoreClient;
use crate::config::ClientConfig;
use crate::model::Order;

/// Fallback message when an order fetch fails without a server message.
pub const ORDERS_FETCH_FAILED: &str = "Failed to fetch orders";

/// Shortest accepted poll interval. `tokio::time::interval` rejects zero.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Orders shown on the admin dashboard.
#[derive(Debug, Clone, Default)]
pub struct OrdersBoard {
    pub orders: Vec<Order>,
    pub last_refreshed: Option<DateTime<Utc>>,
    pub error: Option<String>,
    pub loading: bool,
}

/// Shared handle to the board; the poller writes, the controller reads.
pub type SharedOrdersBoard = Arc<RwLock<OrdersBoard>>;

/// Poller settings.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    /// Consecutive failures before the board shows an error.
    pub failure_threshold: u32,
}

impl PollSettings {
    /// Settings from client config, with zero values raised to their minimum.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            interval: config.poll_interval().max(MIN_POLL_INTERVAL),
            failure_threshold: config.poll_failure_threshold.max(1),
        }
    }
}

/// Handle to a running order poller. Dropping it stops the task.
pub struct OrderPoller {
    cancel: watch::Sender<bool>,
}

impl OrderPoller {
    /// Spawn a poller that refreshes `board` with `token`'s order listing.
    ///
    /// The first poll happens one interval after spawning; callers fetch
    /// immediately themselves. A slow request delays the next tick instead
    /// of stacking requests behind it. Once stopped, an in-flight request is
    /// abandoned and nothing more is written to the board.
    pub fn spawn(
        client: StoreClient,
        token: String,
        board: SharedOrdersBoard,
        settings: PollSettings,
    ) -> Self {
        let (cancel_tx, cancel_rx) = watch::channel(false);

        tokio::spawn(run(client, token, board, settings, cancel_rx));

        Self { cancel: cancel_tx }
    }

    /// Signal the poller to stop.
    pub fn stop(&self) {
        let _ = self.cancel.send(true);
    }

    /// Whether the task is still listening.
    pub fn is_running(&self) -> bool {
        !self.cancel.is_closed()
    }
}

impl Drop for OrderPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run(
    client: StoreClient,
    token: String,
    board: SharedOrdersBoard,
    settings: PollSettings,
    mut cancel_rx: watch::Receiver<bool>,
) {
    let interval = settings.interval.max(MIN_POLL_INTERVAL);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately
    ticker.tick().await;

    let mut failures = 0u32;
    info!(interval_ms = interval.as_millis() as u64, "order poller started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = cancel_rx.changed() => break,
        }

        // Only `true` is ever sent, and a closed channel means the handle was dropped
        let result = tokio::select! {
            result = client.list_orders(&token) => result,
            _ = cancel_rx.changed() => break,
        };

        // stop() may land while the result waits for the lock; check under it
        let mut board = board.write().await;
        if *cancel_rx.borrow() {
            break;
        }

        match result {
            Ok(orders) => {
                failures = 0;
                board.orders = orders;
                board.last_refreshed = Some(Utc::now());
                board.error = None;
                debug!(count = board.orders.len(), "orders refreshed");
            }
            Err(e) => {
                failures += 1;
                warn!(error = %e, failures, "order poll failed");
                if failures >= settings.failure_threshold {
                    board.error = Some(e.user_message(ORDERS_FETCH_FAILED));
                }
            }
        }
    }

    info!("order poller stopped");
}
