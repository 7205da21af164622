//! Storefront controller flows against a live server.

use solstore::client::{OrderStatus, ProductDraft, View};
use solstore::model::ProductUpdate;

use crate::common::{TestServer, ADMIN_PASSWORD, ADMIN_USERNAME};

fn draft(name: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: Some("Soft, stylish".to_string()),
        price: 199.0,
        stock: 10,
        image: None,
    }
}

#[tokio::test]
async fn test_empty_catalog_shows_samples_without_error() {
    let server = TestServer::start().await;
    let storefront = server.storefront().await;

    assert_eq!(storefront.view(), View::Products);
    let prices: Vec<f64> = storefront.products().iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![199.0, 349.0, 149.0, 99.0, 299.0]);
    assert!(storefront.error().is_none());
}

#[tokio::test]
async fn test_live_catalog_replaces_samples() {
    let server = TestServer::start().await;
    let token = server.admin_token().await;
    server
        .client()
        .add_product(&token, &draft("Pink Hairband"))
        .await
        .expect("add");

    let storefront = server.storefront().await;
    assert_eq!(storefront.products().len(), 1);
    assert_eq!(storefront.products()[0].name, "Pink Hairband");
}

#[tokio::test]
async fn test_checkout_clears_cart_and_records_last_order() {
    let server = TestServer::start().await;
    let mut storefront = server.storefront().await;

    let hijab = storefront.products()[1].clone();
    storefront.add_to_cart(&hijab);
    storefront.add_to_cart(&hijab);
    storefront.show_cart();
    assert_eq!(storefront.cart().total(), 698.0);

    storefront.contact.name = "Test User".to_string();
    storefront.contact.address = "123 St".to_string();
    storefront.contact.phone = "123456789".to_string();

    let order_id = storefront.checkout().await.expect("order placed");

    assert_eq!(storefront.order_status(), OrderStatus::Confirmed);
    assert!(storefront.cart().is_empty());
    assert!(storefront.contact.name.is_empty());
    assert!(storefront.error().is_none());

    let last = storefront.last_order().expect("last order");
    assert_eq!(last.order_id, order_id);
    assert_eq!(last.items[0].qty, 2);
    assert_eq!(last.contact.name, "Test User");
}

#[tokio::test]
async fn test_checkout_with_missing_contact_surfaces_server_message() {
    let server = TestServer::start().await;
    let mut storefront = server.storefront().await;

    let beads = storefront.products()[2].clone();
    storefront.add_to_cart(&beads);
    storefront.contact.name = "Test User".to_string();

    assert!(storefront.checkout().await.is_none());
    assert_eq!(storefront.order_status(), OrderStatus::Failed);
    assert_eq!(storefront.error(), Some("Missing fields"));
    assert_eq!(storefront.cart().item_count(), 1);
}

#[tokio::test]
async fn test_login_failure_records_server_message() {
    let server = TestServer::start().await;
    let mut storefront = server.storefront().await;
    storefront.show_admin().await;

    assert!(!storefront.login(ADMIN_USERNAME, "wrong").await);
    assert!(!storefront.is_admin());
    assert_eq!(storefront.admin_error(), Some("Invalid credentials"));
    assert!(!storefront.is_polling());
}

#[tokio::test]
async fn test_admin_dashboard_actions() {
    let server = TestServer::start().await;
    let mut storefront = server.storefront().await;
    storefront.show_admin().await;

    assert!(storefront.login(ADMIN_USERNAME, ADMIN_PASSWORD).await);
    assert!(storefront.is_polling());
    assert!(storefront.orders().await.last_refreshed.is_some());

    assert!(storefront.add_product(&draft("Elegant Hijab")).await);
    assert_eq!(storefront.action_message(), Some("Product added!"));
    assert_eq!(storefront.admin_products().len(), 1);
    let id = storefront.admin_products()[0].id;

    let update = ProductUpdate {
        name: "Elegant Hijab".to_string(),
        description: None,
        price: 299.0,
        stock: 4,
    };
    assert!(storefront.update_product(id, &update).await);
    assert_eq!(storefront.action_message(), Some("Product updated"));
    assert_eq!(storefront.admin_products()[0].price, 299.0);

    assert!(storefront.delete_product(id).await);
    assert_eq!(storefront.action_message(), Some("Product removed"));
    assert!(storefront.admin_products().is_empty());
}

#[tokio::test]
async fn test_leaving_admin_and_logout_stop_polling() {
    let server = TestServer::start().await;
    let mut storefront = server.storefront().await;
    storefront.show_admin().await;
    storefront.login(ADMIN_USERNAME, ADMIN_PASSWORD).await;
    assert!(storefront.is_polling());

    storefront.show_products().await;
    assert!(!storefront.is_polling());

    storefront.show_admin().await;
    assert!(storefront.is_polling());

    storefront.logout().await;
    assert!(!storefront.is_polling());
    assert!(!storefront.is_admin());
    assert!(storefront.orders().await.orders.is_empty());
}
