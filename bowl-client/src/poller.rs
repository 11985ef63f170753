//! Pending Order Poller - new-order badge for the employee dashboard
//!
//! Polls the pending-order count on a fixed interval and raises the badge
//! when it grows. One request is in flight at a time: the loop awaits each
//! check before waiting for the next tick, and late ticks are delayed
//! rather than bursted.

use std::sync::Arc;
use std::time::Duration;

use shared::models::PendingCount;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::notify::Notifier;

pub const PENDING_COUNT_PATH: &str = "/api/employees/orders/pending/count";

/// Baseline comparison of successive pending counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingOrderWatcher {
    baseline: Option<u64>,
}

impl PendingOrderWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn baseline(&self) -> Option<u64> {
        self.baseline
    }

    /// Record `count`; returns how many orders are new.
    ///
    /// Fires only when a baseline exists and `count` exceeds it. The first
    /// observation sets the baseline; a decrease just lowers it.
    pub fn observe(&mut self, count: u64) -> Option<u64> {
        let fired = match self.baseline {
            Some(previous) if count > previous => Some(count - previous),
            _ => None,
        };
        self.baseline = Some(count);
        fired
    }
}

pub struct PendingOrderPoller<H> {
    http: H,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
    watcher: PendingOrderWatcher,
}

impl<H: HttpClient> PendingOrderPoller<H> {
    pub fn new(http: H, notifier: Arc<dyn Notifier>, interval: Duration) -> Self {
        Self {
            http,
            notifier,
            interval,
            watcher: PendingOrderWatcher::new(),
        }
    }

    pub fn watcher(&self) -> &PendingOrderWatcher {
        &self.watcher
    }

    /// One poll. A failed request leaves the baseline untouched.
    pub async fn check(&mut self) -> ClientResult<Option<u64>> {
        let PendingCount { count } = self.http.get(PENDING_COUNT_PATH).await?;
        let fired = self.watcher.observe(count);
        if let Some(new_orders) = fired {
            tracing::info!(new_orders, pending = count, "new pending orders");
            self.notifier.badge(Some(new_orders));
            self.notifier
                .info(&format!("{new_orders} new order(s) waiting! 🔔"));
        }
        Ok(fired)
    }

    /// Poll until `cancel` fires. The first tick is immediate and sets the
    /// baseline.
    pub async fn run(mut self, cancel: CancellationToken) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(interval = ?self.interval, "pending order poller started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(e) = self.check().await {
                        tracing::warn!(error = %e, "pending order poll failed");
                    }
                }
            }
        }
        tracing::info!("pending order poller stopped");
    }
}

impl<H: HttpClient + 'static> PendingOrderPoller<H> {
    /// Run on the tokio runtime
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}
