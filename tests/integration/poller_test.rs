//! Background order polling.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::sync::RwLock;

use solstore::client::{ContactForm, OrderPoller, OrdersBoard, PollSettings, StoreClient};
use solstore::config::ClientConfig;
use solstore::model::OrderItem;

use crate::common::{eventually, TestServer, ADMIN_PASSWORD, ADMIN_USERNAME};

fn settings() -> PollSettings {
    PollSettings {
        interval: Duration::from_millis(100),
        failure_threshold: 2,
    }
}

/// Serve an orders listing that takes `delay` to answer.
async fn start_slow_orders_server(delay: Duration) -> StoreClient {
    let app = Router::new().route(
        "/api/admin/orders",
        get(move || async move {
            tokio::time::sleep(delay).await;
            Json(json!([{
                "id": 7,
                "items": [{"id": 2, "name": "Elegant Hijab", "price": 349.0, "qty": 1}],
                "customer_name": "Late Customer",
                "address": "123 St",
                "phone": "123456789",
                "status": "pending",
                "created_at": "2024-05-01T10:00:00Z"
            }]))
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("addr"));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    StoreClient::new(base_url, &ClientConfig::default()).expect("client")
}

async fn place_order(server: &TestServer, customer: &str) -> i64 {
    server
        .client()
        .place_order(
            &[OrderItem {
                id: 2,
                name: "Elegant Hijab".to_string(),
                price: 349.0,
                qty: 1,
            }],
            &ContactForm {
                name: customer.to_string(),
                address: "123 St".to_string(),
                phone: "123456789".to_string(),
            },
        )
        .await
        .expect("order")
}

#[tokio::test]
async fn test_poller_picks_up_new_orders() {
    let server = TestServer::start().await;
    let board = Arc::new(RwLock::new(OrdersBoard::default()));
    let _poller = OrderPoller::spawn(
        server.client(),
        server.admin_token().await,
        board.clone(),
        settings(),
    );

    let order_id = place_order(&server, "Polled Customer").await;

    let seen = eventually(Duration::from_secs(5), || {
        let board = board.clone();
        async move { board.read().await.orders.first().map(|o| o.id) == Some(order_id) }
    })
    .await;
    assert!(seen, "poller never refreshed the board");
    assert!(board.read().await.error.is_none());
}

#[tokio::test]
async fn test_poller_surfaces_error_after_threshold() {
    let mut server = TestServer::start().await;
    let board = Arc::new(RwLock::new(OrdersBoard::default()));
    let _poller = OrderPoller::spawn(
        server.client(),
        server.admin_token().await,
        board.clone(),
        settings(),
    );

    server.stop();

    let surfaced = eventually(Duration::from_secs(10), || {
        let board = board.clone();
        async move { board.read().await.error.is_some() }
    })
    .await;
    assert!(surfaced, "poll failures were never surfaced");
}

#[tokio::test]
async fn test_rejected_token_surfaces_server_message() {
    let server = TestServer::start().await;
    let board = Arc::new(RwLock::new(OrdersBoard::default()));
    let _poller = OrderPoller::spawn(server.client(), "garbage".to_string(), board.clone(), settings());

    let surfaced = eventually(Duration::from_secs(5), || {
        let board = board.clone();
        async move { board.read().await.error.as_deref() == Some("Invalid token") }
    })
    .await;
    assert!(surfaced);
}

#[tokio::test]
async fn test_stopped_poller_leaves_board_alone() {
    let server = TestServer::start().await;
    let board = Arc::new(RwLock::new(OrdersBoard::default()));
    let token = server
        .client()
        .login(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .expect("login");

    let poller = OrderPoller::spawn(server.client(), token, board.clone(), settings());
    poller.stop();
    let stopped = eventually(Duration::from_secs(2), || {
        let running = poller.is_running();
        async move { !running }
    })
    .await;
    assert!(stopped);

    place_order(&server, "Unseen").await;
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert!(board.read().await.orders.is_empty());
}

#[tokio::test]
async fn test_stop_during_slow_request_discards_result() {
    let client = start_slow_orders_server(Duration::from_millis(400)).await;
    let board = Arc::new(RwLock::new(OrdersBoard::default()));
    let poller = OrderPoller::spawn(
        client,
        "token".to_string(),
        board.clone(),
        PollSettings {
            interval: Duration::from_millis(50),
            failure_threshold: 1,
        },
    );

    // The first request is in flight
    tokio::time::sleep(Duration::from_millis(150)).await;
    drop(poller);
    *board.write().await = OrdersBoard::default();

    tokio::time::sleep(Duration::from_millis(600)).await;

    let board = board.read().await;
    assert!(board.orders.is_empty());
    assert!(board.last_refreshed.is_none());
}

#[tokio::test]
async fn test_zero_interval_still_polls() {
    let server = TestServer::start().await;
    let board = Arc::new(RwLock::new(OrdersBoard::default()));
    let _poller = OrderPoller::spawn(
        server.client(),
        server.admin_token().await,
        board.clone(),
        PollSettings {
            interval: Duration::ZERO,
            failure_threshold: 1,
        },
    );

    let order_id = place_order(&server, "Eager Customer").await;

    let seen = eventually(Duration::from_secs(5), || {
        let board = board.clone();
        async move { board.read().await.orders.first().map(|o| o.id) == Some(order_id) }
    })
    .await;
    assert!(seen, "zero-interval poller never refreshed the board");
}
