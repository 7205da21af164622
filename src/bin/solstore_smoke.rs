//! solstore-smoke: end-to-end check against a running server
//!
//! Hits health, catalog, admin login, checkout and the admin order listing,
//! printing one line per step. Exits non-zero if any step fails.

use clap::Parser;

use solstore::client::{ContactForm, StoreClient};
use solstore::config::ClientConfig;
use solstore::model::OrderItem;
use solstore::utils::bootstrap::init_tracing;

#[derive(Debug, Parser)]
#[command(name = "solstore-smoke", about = "Smoke-test a storefront deployment")]
struct Args {
    #[arg(long, env = "SOLSTORE_BASE_URL", default_value = "http://localhost:5000")]
    base_url: String,

    #[arg(long, default_value = "zahra00")]
    username: String,

    #[arg(long, default_value = "sol.pk")]
    password: String,
}

fn report<T, E: std::fmt::Display>(step: &str, result: &Result<T, E>, detail: impl Fn(&T) -> String) -> bool {
    match result {
        Ok(value) => {
            println!("{step}: ok ({})", detail(value));
            true
        }
        Err(e) => {
            println!("{step}: FAILED ({e})");
            false
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();
    let args = Args::parse();

    let client = StoreClient::new(args.base_url.clone(), &ClientConfig::default())?;
    let mut passed = true;

    let health = client.health().await;
    passed &= report("health", &health, |h| format!("ok={} time={}", h.ok, h.time));

    let products = client.list_products().await;
    passed &= report("products", &products, |p| format!("{} products", p.len()));

    let token = client.login(&args.username, &args.password).await;
    passed &= report("admin login", &token, |_| "token issued".to_string());

    let order = client
        .place_order(
            &[OrderItem {
                id: 1,
                name: "Test".to_string(),
                price: 100.0,
                qty: 1,
            }],
            &ContactForm {
                name: "Test User".to_string(),
                address: "123 St".to_string(),
                phone: "123456789".to_string(),
            },
        )
        .await;
    passed &= report("place order", &order, |id| format!("orderId={id}"));

    if let Ok(token) = &token {
        let orders = client.list_orders(token).await;
        passed &= report("admin orders", &orders, |o| {
            let newest = o.first().map(|o| o.id.to_string()).unwrap_or_else(|| "none".into());
            format!("{} orders, newest id={newest}", o.len())
        });
    } else {
        println!("admin orders: skipped (no token)");
        passed = false;
    }

    if !passed {
        return Err("smoke test failed".into());
    }
    println!("all checks passed");
    Ok(())
}
