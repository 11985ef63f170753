//! Bowl Client - typed client for the restaurant ordering server
//!
//! Talks to the server's HTTP API on behalf of the customer, employee and
//! manager pages. The server owns all state; controllers fetch, render
//! into view models, write, and fetch again.

pub mod config;
pub mod controllers;
pub mod csrf;
pub mod error;
pub mod forms;
pub mod http;
pub mod notify;
pub mod poller;
pub mod session;
pub mod view;

pub use config::ClientConfig;
pub use csrf::CsrfToken;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use notify::{Confirm, Level, Notification, Notifier};
pub use poller::{PendingOrderPoller, PendingOrderWatcher};
pub use session::{Identity, Redirect, Role, SessionCache, SessionContext};

// Re-export shared types for convenience
pub use shared::error::{ApiErrorBody, CartLimit, ErrorCode};
pub use shared::models::{CartLine, Employee, MenuItem, Order, OrderStatus};
