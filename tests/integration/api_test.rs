//! API behavior over real HTTP.

use solstore::auth::TokenSigner;
use solstore::client::{ClientError, ContactForm, ImageUpload, ProductDraft};
use solstore::model::{AdminIdentity, OrderItem, ProductUpdate};

use crate::common::{TestServer, ADMIN_PASSWORD, ADMIN_USERNAME};

fn test_item() -> OrderItem {
    OrderItem {
        id: 1,
        name: "Test".to_string(),
        price: 100.0,
        qty: 1,
    }
}

fn test_contact() -> ContactForm {
    ContactForm {
        name: "Test User".to_string(),
        address: "123 St".to_string(),
        phone: "123456789".to_string(),
    }
}

fn test_draft() -> ProductDraft {
    ProductDraft {
        name: "Test".to_string(),
        description: None,
        price: 10.0,
        stock: 5,
        image: None,
    }
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;
    let health = server.client().health().await.expect("health");
    assert!(health.ok);
}

#[tokio::test]
async fn test_order_is_listed_first_with_pending_status() {
    let server = TestServer::start().await;
    let client = server.client();

    let earlier = client
        .place_order(&[test_item()], &test_contact())
        .await
        .expect("order");
    let order_id = client
        .place_order(&[test_item()], &test_contact())
        .await
        .expect("order");
    assert!(order_id > earlier);

    let token = server.admin_token().await;
    let orders = client.list_orders(&token).await.expect("orders");

    assert_eq!(orders[0].id, order_id);
    assert_eq!(orders[0].status, "pending");
    assert_eq!(orders[0].customer_name, "Test User");
    assert_eq!(orders[0].items, vec![test_item()]);
}

#[tokio::test]
async fn test_order_missing_contact_is_rejected() {
    let server = TestServer::start().await;
    let client = server.client();

    let mut contact = test_contact();
    contact.phone.clear();
    let err = client
        .place_order(&[test_item()], &contact)
        .await
        .expect_err("missing phone");

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Missing fields");

    let token = server.admin_token().await;
    assert!(client.list_orders(&token).await.expect("orders").is_empty());
}

#[tokio::test]
async fn test_login_with_wrong_password_gets_no_token() {
    let server = TestServer::start().await;

    let err = server
        .client()
        .login(ADMIN_USERNAME, "not-the-password")
        .await
        .expect_err("wrong password");

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(server
        .client()
        .login(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_add_product_appears_in_catalog() {
    let server = TestServer::start().await;
    let client = server.client();
    let token = server.admin_token().await;

    let product_id = client.add_product(&token, &test_draft()).await.expect("add");

    let products = client.list_products().await.expect("products");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, product_id);
    assert_eq!(products[0].name, "Test");
    assert_eq!(products[0].price, 10.0);
    assert_eq!(products[0].stock, 5);
    assert!(products[0].image.is_none());
}

#[tokio::test]
async fn test_uploaded_image_is_served() {
    let server = TestServer::start().await;
    let client = server.client();
    let token = server.admin_token().await;

    let mut draft = test_draft();
    draft.image = Some(ImageUpload {
        file_name: "ring.jpg".to_string(),
        bytes: b"jpeg-bytes".to_vec(),
    });
    client.add_product(&token, &draft).await.expect("add");

    let image = client.list_products().await.expect("products")[0]
        .image
        .clone()
        .expect("image stored");
    assert!(image.ends_with(".jpg"));

    let served = reqwest::get(format!("{}/uploads/{}", server.base_url, image))
        .await
        .expect("fetch image")
        .bytes()
        .await
        .expect("image body");
    assert_eq!(&served[..], b"jpeg-bytes");
}

#[tokio::test]
async fn test_rejected_tokens_mutate_nothing() {
    let server = TestServer::start().await;
    let client = server.client();

    let identity = AdminIdentity {
        id: 1,
        username: ADMIN_USERNAME.to_string(),
    };
    let foreign = TokenSigner::new(b"another-secret", chrono::TimeDelta::days(1))
        .issue(&identity)
        .expect("issue");
    let expired = TokenSigner::new(b"test-secret", chrono::TimeDelta::seconds(-10))
        .issue(&identity)
        .expect("issue");

    for token in [foreign.as_str(), expired.as_str(), "garbage"] {
        let err = client
            .add_product(token, &test_draft())
            .await
            .expect_err("rejected token");
        assert!(matches!(err, ClientError::Server { status: 403, .. }));
    }

    assert!(client.list_products().await.expect("products").is_empty());
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let server = TestServer::start().await;

    let status = reqwest::Client::new()
        .delete(format!("{}/api/admin/products/1", server.base_url))
        .send()
        .await
        .expect("request")
        .status();

    assert_eq!(status.as_u16(), 401);
}

#[tokio::test]
async fn test_update_and_idempotent_delete() {
    let server = TestServer::start().await;
    let client = server.client();
    let token = server.admin_token().await;
    let id = client.add_product(&token, &test_draft()).await.expect("add");

    let updated = client
        .update_product(
            &token,
            id,
            &ProductUpdate {
                name: "Renamed".to_string(),
                description: Some("Now with a description".to_string()),
                price: 12.5,
                stock: 0,
            },
        )
        .await
        .expect("update");
    assert_eq!(updated, 1);

    let product = &client.list_products().await.expect("products")[0];
    assert_eq!(product.name, "Renamed");
    assert_eq!(product.price, 12.5);
    assert!(!product.in_stock());

    assert_eq!(client.delete_product(&token, id).await.expect("delete"), 1);
    assert_eq!(client.delete_product(&token, id).await.expect("delete"), 0);
    assert_eq!(client.delete_product(&token, 9999).await.expect("delete"), 0);
}
