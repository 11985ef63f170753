//! Page controllers
//!
//! One controller per page. Each receives the HTTP transport, a
//! [`Notifier`] and a [`SessionContext`] and keeps only the data of its
//! latest fetch.

pub mod customer;
pub mod customer_orders;
pub mod employee_orders;
pub mod landing;
pub mod manager;

pub use customer::CustomerDashboard;
pub use customer_orders::CustomerOrders;
pub use employee_orders::{EmployeeOrders, StatusChange};
pub use landing::{AuthTab, LandingController, LoginOutcome};
pub use manager::{ManagerDashboard, ManagerTab};

use serde::de::IgnoredAny;
use shared::error::ErrorCategory;

use crate::error::ClientError;
use crate::http::HttpClient;
use crate::notify::Notifier;
use crate::session::SessionCache;

/// Report a failed action and hand the error back
pub(crate) fn fail(notifier: &dyn Notifier, action: &str, err: ClientError) -> ClientError {
    let category = err.category();
    match category {
        ErrorCategory::System => {
            tracing::error!(action, category = category.name(), error = %err, "action failed")
        }
        _ => tracing::warn!(action, category = category.name(), error = %err, "action rejected"),
    }
    notifier.error(&format!("{action}: {}", err.user_message()));
    err
}

/// CSRF-protected server logout. Local state is cleared by the caller
/// whatever the outcome.
pub(crate) async fn server_logout<H: HttpClient>(http: &H, cache: Option<&SessionCache>) {
    match http.post_empty::<IgnoredAny>("/logout").await {
        Ok(_) => tracing::info!("logged out"),
        Err(e) => tracing::warn!(error = %e, "server logout failed; clearing local session anyway"),
    }
    if let Some(cache) = cache
        && let Err(e) = cache.clear()
    {
        tracing::warn!(error = %e, "failed to clear session cache");
    }
}
