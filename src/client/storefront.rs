//! View-state controller for the storefront.
//!
//! Holds everything the shop UI renders: the current view, the catalog, the
//! cart and checkout outcome, and the admin session with its dashboard. Each
//! transition is an explicit method call; nothing here renders anything.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use super::poller::{OrderPoller, OrdersBoard, PollSettings, SharedOrdersBoard, ORDERS_FETCH_FAILED};
use super::{sample_products, Cart, CartLine, ContactForm, ProductDraft, StoreClient};
use crate::config::ClientConfig;
use crate::model::{Product, ProductUpdate};

/// Error shown when the catalog fetch fails and samples are displayed instead.
pub const SAMPLES_FALLBACK_MESSAGE: &str = "Failed to load products (showing samples)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Products,
    Cart,
    Admin,
}

/// Outcome of the most recent checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Idle,
    Confirmed,
    Failed,
}

/// Confirmation data for the last successful checkout.
#[derive(Debug, Clone)]
pub struct LastOrder {
    pub order_id: i64,
    pub items: Vec<CartLine>,
    pub contact: ContactForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminSession {
    LoggedOut { error: Option<String> },
    LoggedIn { token: String },
}

/// The storefront controller.
pub struct Storefront {
    client: StoreClient,
    poll: PollSettings,

    view: View,
    products: Vec<Product>,
    error: Option<String>,

    cart: Cart,
    /// Checkout form contents.
    pub contact: ContactForm,
    order_status: OrderStatus,
    last_order: Option<LastOrder>,

    admin: AdminSession,
    admin_products: Vec<Product>,
    action_message: Option<String>,
    orders: SharedOrdersBoard,
    poller: Option<OrderPoller>,
}

impl Storefront {
    /// Create a controller on the products view with nothing loaded yet.
    pub fn new(client: StoreClient, config: &ClientConfig) -> Self {
        Self {
            client,
            poll: PollSettings::from_config(config),
            view: View::Products,
            products: Vec::new(),
            error: None,
            cart: Cart::new(),
            contact: ContactForm::default(),
            order_status: OrderStatus::Idle,
            last_order: None,
            admin: AdminSession::LoggedOut { error: None },
            admin_products: Vec::new(),
            action_message: None,
            orders: Arc::new(RwLock::new(OrdersBoard::default())),
            poller: None,
        }
    }

    /// Create a controller and load the catalog for the products view.
    pub async fn open(client: StoreClient, config: &ClientConfig) -> Self {
        let mut storefront = Self::new(client, config);
        storefront.load_catalog().await;
        storefront
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub async fn show_products(&mut self) {
        self.stop_polling();
        self.view = View::Products;
        self.load_catalog().await;
    }

    pub fn show_cart(&mut self) {
        self.stop_polling();
        self.view = View::Cart;
    }

    /// Enter the admin view. When logged in this also loads orders and
    /// starts the background poller.
    pub async fn show_admin(&mut self) {
        self.view = View::Admin;
        self.load_catalog().await;

        if self.token().is_some() {
            self.refresh_orders().await;
            self.start_polling();
        }
    }

    /// Fetch the catalog, substituting samples when it is empty or unreachable.
    async fn load_catalog(&mut self) {
        let products = match self.client.list_products().await {
            Ok(products) if !products.is_empty() => products,
            Ok(_) => sample_products(),
            Err(e) => {
                warn!(error = %e, "catalog fetch failed, showing samples");
                self.error = Some(SAMPLES_FALLBACK_MESSAGE.to_string());
                sample_products()
            }
        };

        if self.view == View::Admin {
            self.admin_products = products.clone();
        }
        self.products = products;
    }

    // ------------------------------------------------------------------
    // Cart & checkout
    // ------------------------------------------------------------------

    /// Add one unit of a catalog product. Returns false when out of stock.
    pub fn add_to_cart(&mut self, product: &Product) -> bool {
        self.cart.add(product)
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Submit the cart with the contact form. Returns the order id on success.
    pub async fn checkout(&mut self) -> Option<i64> {
        self.last_order = None;
        let items = self.cart.order_items();

        match self.client.place_order(&items, &self.contact).await {
            Ok(order_id) => {
                info!(order_id, lines = items.len(), "order confirmed");
                self.order_status = OrderStatus::Confirmed;
                self.last_order = Some(LastOrder {
                    order_id,
                    items: self.cart.lines().to_vec(),
                    contact: std::mem::take(&mut self.contact),
                });
                self.cart.clear();
                self.error = None;
                Some(order_id)
            }
            Err(e) => {
                warn!(error = %e, "checkout failed");
                self.order_status = OrderStatus::Failed;
                self.error = Some(e.user_message("Order failed"));
                None
            }
        }
    }

    /// Dismiss a failed checkout so the form can be resubmitted.
    pub fn retry(&mut self) {
        self.order_status = OrderStatus::Idle;
    }

    // ------------------------------------------------------------------
    // Admin session
    // ------------------------------------------------------------------

    /// Log in as admin. On the admin view this also loads orders and starts
    /// polling.
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        self.admin = AdminSession::LoggedOut { error: None };

        match self.client.login(username, password).await {
            Ok(token) => {
                self.admin = AdminSession::LoggedIn { token };
                self.error = None;
                if self.view == View::Admin {
                    self.refresh_orders().await;
                    self.start_polling();
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "admin login failed");
                self.admin = AdminSession::LoggedOut {
                    error: Some(e.user_message("Login failed")),
                };
                false
            }
        }
    }

    pub async fn logout(&mut self) {
        self.stop_polling();
        self.admin = AdminSession::LoggedOut { error: None };
        self.action_message = None;
        *self.orders.write().await = OrdersBoard::default();
    }

    pub async fn add_product(&mut self, draft: &ProductDraft) -> bool {
        let Some(token) = self.token().map(str::to_string) else {
            return false;
        };

        let ok = match self.client.add_product(&token, draft).await {
            Ok(product_id) => {
                info!(product_id, "product added");
                self.action_message = Some("Product added!".to_string());
                true
            }
            Err(e) => {
                self.action_message = Some(e.user_message("Failed to add product"));
                false
            }
        };

        self.after_admin_action().await;
        ok
    }

    pub async fn update_product(&mut self, id: i64, update: &ProductUpdate) -> bool {
        let Some(token) = self.token().map(str::to_string) else {
            return false;
        };

        let ok = match self.client.update_product(&token, id, update).await {
            Ok(updated) => {
                self.action_message = Some(if updated > 0 {
                    "Product updated".to_string()
                } else {
                    "Product not found".to_string()
                });
                updated > 0
            }
            Err(e) => {
                self.action_message = Some(e.user_message("Failed to update"));
                false
            }
        };

        self.after_admin_action().await;
        ok
    }

    pub async fn delete_product(&mut self, id: i64) -> bool {
        let Some(token) = self.token().map(str::to_string) else {
            return false;
        };

        let ok = match self.client.delete_product(&token, id).await {
            Ok(_) => {
                self.action_message = Some("Product removed".to_string());
                true
            }
            Err(e) => {
                self.action_message = Some(e.user_message("Failed to remove"));
                false
            }
        };

        self.after_admin_action().await;
        ok
    }

    /// Re-fetch the admin product list and the orders.
    async fn after_admin_action(&mut self) {
        match self.client.list_products().await {
            Ok(products) => self.admin_products = products,
            Err(e) => warn!(error = %e, "admin product refresh failed"),
        }
        self.refresh_orders().await;
    }

    /// Fetch orders now, surfacing any error on the board.
    pub async fn refresh_orders(&mut self) {
        let Some(token) = self.token().map(str::to_string) else {
            return;
        };

        {
            let mut board = self.orders.write().await;
            board.loading = true;
            board.error = None;
        }

        let result = self.client.list_orders(&token).await;

        let mut board = self.orders.write().await;
        board.loading = false;
        match result {
            Ok(orders) => {
                board.orders = orders;
                board.last_refreshed = Some(chrono::Utc::now());
            }
            Err(e) => board.error = Some(e.user_message(ORDERS_FETCH_FAILED)),
        }
    }

    fn start_polling(&mut self) {
        let Some(token) = self.token().map(str::to_string) else {
            return;
        };

        // Replacing the handle drops and stops any previous poller
        self.poller = Some(OrderPoller::spawn(
            self.client.clone(),
            token,
            self.orders.clone(),
            self.poll,
        ));
    }

    fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
    }

    // ------------------------------------------------------------------
    // Read-only state
    // ------------------------------------------------------------------

    pub fn view(&self) -> View {
        self.view
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Storefront-level error: catalog fallback or checkout failure.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn order_status(&self) -> OrderStatus {
        self.order_status
    }

    pub fn last_order(&self) -> Option<&LastOrder> {
        self.last_order.as_ref()
    }

    pub fn admin_session(&self) -> &AdminSession {
        &self.admin
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.admin, AdminSession::LoggedIn { .. })
    }

    pub fn admin_error(&self) -> Option<&str> {
        match &self.admin {
            AdminSession::LoggedOut { error } => error.as_deref(),
            AdminSession::LoggedIn { .. } => None,
        }
    }

    pub fn admin_products(&self) -> &[Product] {
        &self.admin_products
    }

    pub fn action_message(&self) -> Option<&str> {
        self.action_message.as_deref()
    }

    /// Shared order board, updated by the poller in the background.
    pub fn orders_board(&self) -> SharedOrdersBoard {
        self.orders.clone()
    }

    /// Copy of the order board as it stands now.
    pub async fn orders(&self) -> OrdersBoard {
        self.orders.read().await.clone()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(OrderPoller::is_running)
    }

    fn token(&self) -> Option<&str> {
        match &self.admin {
            AdminSession::LoggedIn { token } => Some(token),
            AdminSession::LoggedOut { .. } => None,
        }
    }
}
