//! Notification and confirmation seams
//!
//! Controllers never print. They report toasts, alerts and the pending
//! order badge through [`Notifier`] and ask yes/no questions through
//! [`Confirm`], so any front end can render them.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    /// Show (`Some`) or hide (`None`) the new-order badge
    fn badge(&self, count: Option<u64>);

    fn info(&self, message: &str) {
        self.notify(Notification {
            level: Level::Info,
            message: message.to_string(),
        });
    }

    fn success(&self, message: &str) {
        self.notify(Notification {
            level: Level::Success,
            message: message.to_string(),
        });
    }

    fn warning(&self, message: &str) {
        self.notify(Notification {
            level: Level::Warning,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Notification {
            level: Level::Error,
            message: message.to_string(),
        });
    }
}

/// Writes notifications to the log
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, n: Notification) {
        match n.level {
            Level::Info | Level::Success => tracing::info!(level = ?n.level, "{}", n.message),
            Level::Warning => tracing::warn!("{}", n.message),
            Level::Error => tracing::error!("{}", n.message),
        }
    }

    fn badge(&self, count: Option<u64>) {
        tracing::info!(?count, "badge");
    }
}

/// Keeps every notification in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    notifications: Vec<Notification>,
    badge: Option<u64>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.inner
            .lock()
            .map(|s| s.notifications.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.inner
            .lock()
            .ok()
            .and_then(|s| s.notifications.last().cloned())
    }

    pub fn badge_count(&self) -> Option<u64> {
        self.inner.lock().ok().and_then(|s| s.badge)
    }

    pub fn clear(&self) {
        if let Ok(mut s) = self.inner.lock() {
            s.notifications.clear();
        }
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut s) = self.inner.lock() {
            s.notifications.push(notification);
        }
    }

    fn badge(&self, count: Option<u64>) {
        if let Ok(mut s) = self.inner.lock() {
            s.badge = count;
        }
    }
}

/// Yes/no prompt
///
/// Async so a front end can read the answer from the same input stream
/// it reads commands from.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, question: &str) -> bool;
}

/// Answers every question the same way
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

#[async_trait]
impl Confirm for FixedAnswer {
    async fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}

#[async_trait]
impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    async fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}
