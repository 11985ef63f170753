// bowl-client/src/controllers/customer_orders.rs
// Customer order history

use std::sync::Arc;
use std::time::Duration;

use shared::models::Order;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::notify::Notifier;
use crate::session::{Identity, Redirect, Role, SessionCache, SessionContext};
use crate::view::OrderCard;
use crate::view::orders::order_cards;

pub struct CustomerOrders<H> {
    http: H,
    notifier: Arc<dyn Notifier>,
    customer: Identity,
    cache: Option<SessionCache>,
    cards: Vec<OrderCard>,
}

impl<H: HttpClient> CustomerOrders<H> {
    pub fn new(http: H, notifier: Arc<dyn Notifier>, session: &SessionContext) -> ClientResult<Self> {
        let customer = session.require(Role::Customer)?.clone();
        Ok(Self {
            http,
            notifier,
            customer,
            cache: None,
            cards: Vec::new(),
        })
    }

    pub fn with_cache(mut self, cache: SessionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// `GET /api/orders/customers/{id}/orders`, newest first
    pub async fn load(&mut self) -> ClientResult<&[OrderCard]> {
        let path = format!("/api/orders/customers/{}/orders", self.customer.id);
        let orders: Vec<Order> = self
            .http
            .get(&path)
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not load your orders", e))?;
        tracing::debug!(count = orders.len(), "customer orders loaded");
        self.cards = order_cards(&orders);
        Ok(&self.cards)
    }

    pub fn cards(&self) -> &[OrderCard] {
        &self.cards
    }

    /// Reload every `period` until cancelled, handing each render to `on_update`.
    ///
    /// Stops early when the session has expired.
    pub async fn refresh_every<F>(&mut self, period: Duration, cancel: CancellationToken, mut on_update: F)
    where
        F: FnMut(&[OrderCard]),
    {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    match self.load().await {
                        Ok(cards) => on_update(cards),
                        Err(e) if e.is_unauthorized() => {
                            tracing::warn!("session expired; order refresh stopped");
                            break;
                        }
                        Err(_) => {}
                    }
                }
            }
        }
    }

    pub async fn logout(self) -> Redirect {
        super::server_logout(&self.http, self.cache.as_ref()).await;
        Redirect::Landing
    }
}
