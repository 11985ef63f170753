// bowl-client/src/controllers/employee_orders.rs
// Employee order board - filter, status workflow, bill, new-order badge

use std::sync::Arc;
use std::time::Duration;

use serde::de::IgnoredAny;
use shared::models::{Order, OrderStatus, OrderStatusUpdate};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::notify::{Confirm, Notifier};
use crate::poller::PendingOrderPoller;
use crate::session::{Identity, Redirect, Role, SessionCache, SessionContext};
use crate::view::orders::order_cards;
use crate::view::{BillRenderer, OrderCard, OrderFilter, OrderStatistics};

const BILL_WIDTH: usize = 48;

/// Result of a status change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Applied,
    /// The confirmation prompt was declined; nothing was sent
    Declined,
}

pub struct EmployeeOrders<H> {
    http: H,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    employee: Identity,
    cache: Option<SessionCache>,
    orders: Vec<Order>,
    filter: OrderFilter,
    poller: Option<(CancellationToken, JoinHandle<()>)>,
}

impl<H: HttpClient + Clone + 'static> EmployeeOrders<H> {
    pub fn new(
        http: H,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        session: &SessionContext,
    ) -> ClientResult<Self> {
        let employee = session.require(Role::Employee)?.clone();
        Ok(Self {
            http,
            notifier,
            confirm,
            employee,
            cache: None,
            orders: Vec::new(),
            filter: OrderFilter::All,
            poller: None,
        })
    }

    pub fn with_cache(mut self, cache: SessionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn welcome_text(&self) -> String {
        format!("Hello, {}", self.employee.display_name)
    }

    /// Reload every order.
    ///
    /// The unfiltered list is requested first so an expired session is
    /// caught (`Unauthorized`, redirect to the employee login); then each
    /// status is fetched in turn and the results concatenated. A failed
    /// per-status fetch is logged and skipped.
    pub async fn load_orders(&mut self) -> ClientResult<&[Order]> {
        if let Err(e) = self
            .http
            .get::<IgnoredAny>("/api/employees/orders")
            .await
        {
            if e.is_unauthorized() {
                tracing::warn!("employee session expired");
                return Err(e);
            }
            return Err(super::fail(self.notifier.as_ref(), "Could not load orders", e));
        }

        let mut all = Vec::new();
        for status in OrderStatus::ALL {
            let path = format!(
                "/api/employees/orders?status={}",
                urlencoding::encode(status.as_str())
            );
            match self.http.get::<Vec<Order>>(&path).await {
                Ok(mut orders) => all.append(&mut orders),
                Err(e) => tracing::error!(%status, error = %e, "failed to fetch orders by status"),
            }
        }
        tracing::debug!(count = all.len(), "orders loaded");
        self.orders = all;
        Ok(&self.orders)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, order_id: i64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id() == order_id)
    }

    pub fn statistics(&self) -> OrderStatistics {
        OrderStatistics::from_orders(&self.orders)
    }

    pub fn filter(&self) -> OrderFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: OrderFilter) {
        self.filter = filter;
    }

    /// Cards matching the current filter, newest first
    pub fn cards(&self) -> Vec<OrderCard> {
        let visible: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| self.filter.matches(o))
            .cloned()
            .collect();
        order_cards(&visible)
    }

    /// Request a status change.
    ///
    /// Transitions the current status does not allow are refused without
    /// a request. Otherwise the user is asked to confirm, the change is
    /// sent, and all orders are reloaded.
    pub async fn update_status(&mut self, order_id: i64, new_status: OrderStatus) -> ClientResult<StatusChange> {
        let Some(order) = self.order(order_id) else {
            self.notifier.error(&format!("Order #{order_id} is not on the board"));
            return Err(ClientError::NotFound(format!("order {order_id}")));
        };
        let (current, customer_id) = (order.status, order.customer_id);

        if !current.can_transition_to(new_status) {
            tracing::warn!(order_id, %current, %new_status, "status change refused");
            self.notifier.warning(&format!(
                "Order #{order_id} cannot change from \"{current}\" to \"{new_status}\""
            ));
            return Err(ClientError::InvalidTransition {
                from: current,
                to: new_status,
            });
        }

        let question = format!("Change order #{order_id} to \"{new_status}\"?");
        if !self.confirm.confirm(&question).await {
            tracing::debug!(order_id, "status change declined");
            return Ok(StatusChange::Declined);
        }

        let path = format!("/api/employees/orders/{order_id}/status");
        let body = OrderStatusUpdate {
            customer_id,
            new_status,
        };
        match self.http.put::<IgnoredAny, _>(&path, &body).await {
            Ok(_) => {}
            Err(e) if e.is_unauthorized() => return Err(e),
            Err(e) => return Err(super::fail(self.notifier.as_ref(), "Could not update order status", e)),
        }

        tracing::info!(order_id, %new_status, "order status updated");
        self.notifier
            .success(&format!("Order #{order_id} is now \"{new_status}\""));
        self.load_orders().await?;
        Ok(StatusChange::Applied)
    }

    /// Printable receipt for one loaded order
    pub fn bill(&self, order_id: i64) -> Option<String> {
        self.order(order_id)
            .map(|order| BillRenderer::new(order, BILL_WIDTH).render())
    }

    /// Start polling for new pending orders; replaces a running poller
    pub fn start_polling(&mut self, period: Duration) {
        self.stop_polling();
        let cancel = CancellationToken::new();
        let poller = PendingOrderPoller::new(self.http.clone(), self.notifier.clone(), period);
        let handle = poller.spawn(cancel.clone());
        self.poller = Some((cancel, handle));
    }

    pub fn stop_polling(&mut self) {
        if let Some((cancel, _handle)) = self.poller.take() {
            cancel.cancel();
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }

    /// Clear the badge and reload
    pub async fn acknowledge_badge(&mut self) -> ClientResult<&[Order]> {
        self.notifier.badge(None);
        self.load_orders().await
    }

    /// Stop polling and log out
    pub async fn logout(mut self) -> Redirect {
        self.stop_polling();
        super::server_logout(&self.http, self.cache.as_ref()).await;
        Redirect::EmployeeLogin
    }
}

impl<H> Drop for EmployeeOrders<H> {
    fn drop(&mut self) {
        if let Some((cancel, _)) = self.poller.take() {
            cancel.cancel();
        }
    }
}
