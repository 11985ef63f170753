// bowl-client/src/controllers/customer.rs
// Customer dashboard - menu, server-side cart, order placement

use std::sync::Arc;

use serde::Serialize;
use serde::de::IgnoredAny;
use shared::error::{CartLimit, ErrorCode};
use shared::models::{CartLine, CustomerProfile, MAX_QUANTITY, MIN_QUANTITY, MenuItem};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::notify::Notifier;
use crate::session::{Identity, Redirect, Role, SessionCache, SessionContext};
use crate::view::CartView;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToCart {
    customer_id: i64,
    menu_item_id: i64,
    quantity: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateQuantity {
    customer_id: i64,
    quantity: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomerRef {
    customer_id: i64,
}

fn limit_message(limit: CartLimit) -> String {
    match limit {
        CartLimit::Maximum => format!("Cannot add more: the limit is {MAX_QUANTITY} per item"),
        CartLimit::Minimum => format!("Cannot reduce further: quantity must be at least {MIN_QUANTITY}"),
    }
}

pub struct CustomerDashboard<H> {
    http: H,
    notifier: Arc<dyn Notifier>,
    customer: Identity,
    cache: Option<SessionCache>,
    menu: Vec<MenuItem>,
    cart: CartView,
}

impl<H: HttpClient> CustomerDashboard<H> {
    /// Fails with `ClientError::Session` unless a customer is logged in
    pub fn new(http: H, notifier: Arc<dyn Notifier>, session: &SessionContext) -> ClientResult<Self> {
        let customer = session.require(Role::Customer)?.clone();
        Ok(Self {
            http,
            notifier,
            customer,
            cache: None,
            menu: Vec::new(),
            cart: CartView::default(),
        })
    }

    pub fn with_cache(mut self, cache: SessionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn customer_id(&self) -> i64 {
        self.customer.id
    }

    /// Load profile greeting, menu and cart
    pub async fn load(&mut self) -> String {
        let welcome = self.welcome_text().await;
        self.load_menu().await;
        self.load_cart().await;
        welcome
    }

    /// "Hello, <name>" from the profile; falls back to the session name
    pub async fn welcome_text(&self) -> String {
        let path = format!("/api/customers/{}", self.customer.id);
        let name = match self.http.get::<CustomerProfile>(&path).await {
            Ok(profile) => profile.display_name().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load customer profile");
                self.customer.display_name.clone()
            }
        };
        format!("Hello, {name}")
    }

    // ==================== Menu ====================

    /// Active menu items; an unreachable menu shows as empty
    pub async fn load_menu(&mut self) -> &[MenuItem] {
        self.menu = match self.http.get::<Vec<MenuItem>>("/api/manager/menu-items").await {
            Ok(items) => items.into_iter().filter(|i| i.active).collect(),
            Err(e) => {
                tracing::error!(error = %e, "failed to load menu");
                Vec::new()
            }
        };
        &self.menu
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    // ==================== Cart ====================

    /// Authoritative cart. Errors propagate.
    pub async fn fetch_cart(&self) -> ClientResult<Vec<CartLine>> {
        let path = format!("/api/cart/customer/{}", self.customer.id);
        self.http.get(&path).await
    }

    /// Re-fetch and re-render the cart. A failed fetch renders empty.
    pub async fn load_cart(&mut self) -> &CartView {
        let lines = self.fetch_cart().await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to load cart");
            Vec::new()
        });
        self.render(&lines)
    }

    pub fn cart(&self) -> &CartView {
        &self.cart
    }

    fn render(&mut self, lines: &[CartLine]) -> &CartView {
        self.cart = CartView::from_lines(lines);
        &self.cart
    }

    /// Add one of a menu item (`POST /api/cart/add`)
    pub async fn add_to_cart(&mut self, menu_item_id: i64) -> ClientResult<CartView> {
        let Some(item) = self.menu.iter().find(|i| i.id == menu_item_id).cloned() else {
            self.notifier.error("This item is not on the menu");
            return Err(ClientError::NotFound(format!("menu item {menu_item_id}")));
        };
        let form = AddToCart {
            customer_id: self.customer.id,
            menu_item_id,
            quantity: 1,
        };
        let result = self
            .http
            .post_form::<IgnoredAny, _>("/api/cart/add", &form)
            .await;
        match result {
            Ok(_) => {
                tracing::info!(menu_item_id, "added to cart");
                self.notifier.success(&format!("{} added to cart", item.name));
                Ok(self.load_cart().await.clone())
            }
            Err(e) => {
                let err = super::fail(self.notifier.as_ref(), "Could not add item", e);
                self.load_cart().await;
                Err(err)
            }
        }
    }

    pub async fn increment(&mut self, line_id: i64) -> ClientResult<CartView> {
        self.change_quantity(line_id, 1).await
    }

    pub async fn decrement(&mut self, line_id: i64) -> ClientResult<CartView> {
        self.change_quantity(line_id, -1).await
    }

    /// Fetch, bounds-check, write once, re-fetch.
    ///
    /// Out-of-range targets are reported and nothing is sent.
    async fn change_quantity(&mut self, line_id: i64, delta: i64) -> ClientResult<CartView> {
        let lines = self
            .fetch_cart()
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not load cart", e))?;

        let Some(line) = lines.iter().find(|l| l.id == line_id) else {
            self.notifier.error("This item is no longer in your cart");
            self.render(&lines);
            return Err(ClientError::NotFound(format!("cart line {line_id}")));
        };

        let target = i64::from(line.quantity) + delta;
        let limit = if target > i64::from(MAX_QUANTITY) {
            Some(CartLimit::Maximum)
        } else if target < i64::from(MIN_QUANTITY) {
            Some(CartLimit::Minimum)
        } else {
            None
        };
        if let Some(limit) = limit {
            tracing::warn!(line_id, target, "quantity change blocked client-side");
            self.notifier.warning(&limit_message(limit));
            return Ok(self.render(&lines).clone());
        }

        let form = UpdateQuantity {
            customer_id: self.customer.id,
            quantity: target as u32,
        };
        let path = format!("/api/cart/update/{line_id}");
        let result = self.http.put_form::<IgnoredAny, _>(&path, &form).await;
        let view = self.load_cart().await.clone();

        match result {
            Ok(_) => {
                tracing::info!(line_id, quantity = target, "cart quantity updated");
                Ok(view)
            }
            Err(e) => match e.cart_limit() {
                Some(limit) => {
                    tracing::warn!(line_id, error = %e, "server rejected quantity");
                    self.notifier.warning(&limit_message(limit));
                    Ok(view)
                }
                None => Err(super::fail(self.notifier.as_ref(), "Could not update quantity", e)),
            },
        }
    }

    /// Remove a line (`DELETE /api/cart/remove/{id}`)
    pub async fn remove(&mut self, line_id: i64) -> ClientResult<CartView> {
        let path = format!("/api/cart/remove/{line_id}");
        let form = CustomerRef {
            customer_id: self.customer.id,
        };
        let result = self.http.delete_form::<IgnoredAny, _>(&path, &form).await;
        let view = self.load_cart().await.clone();
        match result {
            Ok(_) => {
                tracing::info!(line_id, "removed from cart");
                Ok(view)
            }
            Err(e) => Err(super::fail(self.notifier.as_ref(), "Could not remove item", e)),
        }
    }

    // ==================== Orders ====================

    /// Turn the cart into an order. An empty cart is rejected locally.
    pub async fn place_order(&mut self) -> ClientResult<()> {
        let lines = self
            .fetch_cart()
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not load cart", e))?;
        if lines.is_empty() {
            self.notifier
                .error("Your cart is empty. Add items before placing an order.");
            self.render(&lines);
            return Err(ClientError::Validation {
                code: Some(ErrorCode::EmptyCart),
                message: ErrorCode::EmptyCart.message().to_string(),
                field_errors: Default::default(),
            });
        }

        let path = format!("/api/orders/customers/{}/place-order", self.customer.id);
        match self.http.post_empty::<IgnoredAny>(&path).await {
            Ok(_) => {
                tracing::info!(customer_id = self.customer.id, "order placed");
                self.notifier
                    .success("Order placed! Your order is waiting to be prepared.");
                self.load_cart().await;
                Ok(())
            }
            Err(e) => Err(super::fail(self.notifier.as_ref(), "Could not place order", e)),
        }
    }

    /// Log out; local state is cleared even if the server call fails
    pub async fn logout(self) -> Redirect {
        super::server_logout(&self.http, self.cache.as_ref()).await;
        Redirect::Landing
    }
}
