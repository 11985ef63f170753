//! Order Model

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status
///
/// Transitions are server-authoritative; the client only uses this table
/// to decide which actions to offer:
///
/// ```text
/// Pending ──► In Progress ──► Finish
///    │             │
///    └──► Cancelled ◄┘
/// ```
///
/// `Finish` and `Cancelled` are terminal. A value outside the four known
/// statuses decodes to `Unknown`, which offers no actions, so one odd
/// order does not fail the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Pending", alias = "PENDING")]
    Pending,
    #[serde(rename = "In Progress", alias = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "Finish", alias = "FINISH")]
    Finish,
    #[serde(rename = "Cancelled", alias = "CANCELLED")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// All statuses in workflow order
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Finish,
        OrderStatus::Cancelled,
    ];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Finish => "Finish",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    /// Human label shown on the status badge
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Waiting",
            Self::InProgress => "Preparing",
            Self::Finish => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    /// Badge icon
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Pending => "🟡",
            Self::InProgress => "🔵",
            Self::Finish => "🟢",
            Self::Cancelled => "🔴",
            Self::Unknown => "⚪",
        }
    }

    /// Statuses reachable from this one
    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            Self::Pending => &[Self::InProgress, Self::Cancelled],
            Self::InProgress => &[Self::Finish, Self::Cancelled],
            Self::Finish | Self::Cancelled | Self::Unknown => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finish | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status value: {0}. Valid values are: Pending, In Progress, Finish, Cancelled")]
pub struct InvalidStatus(pub String);

impl FromStr for OrderStatus {
    type Err = InvalidStatus;

    /// Case-insensitive; accepts the wire value or the enum-style name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', " ");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}

/// Order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub item_name: String,
    pub item_price: Decimal,
    pub quantity: u32,
    /// Server-computed; falls back to `item_price × quantity`
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.subtotal
            .unwrap_or_else(|| self.item_price * Decimal::from(self.quantity))
    }
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub order_id: Option<i64>,
    pub customer_id: i64,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total_price: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub order_date: Option<NaiveDateTime>,
}

impl Order {
    /// Identifier used in status-update paths.
    ///
    /// Older servers omit `orderId` and key orders by customer id.
    pub fn id(&self) -> i64 {
        self.order_id.unwrap_or(self.customer_id)
    }
}

/// Status update payload (`PUT /api/employees/orders/{id}/status`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub customer_id: i64,
    pub new_status: OrderStatus,
}

/// Pending order counter (`GET /api/employees/orders/pending/count`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCount {
    #[serde(default)]
    pub count: u64,
}
