//! Report Models
//!
//! Aggregation happens on the server; these are display-only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily sales report (`GET /api/reports/sales`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    #[serde(default)]
    pub order_count: u64,
    #[serde(default)]
    pub revenue: Decimal,
    #[serde(default)]
    pub new_customers: u64,
    #[serde(default)]
    pub avg_rating: f64,
}

/// Monthly summary (`GET /api/reports/monthly`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    #[serde(default)]
    pub total_revenue: Decimal,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub top_menu: Option<String>,
    #[serde(default)]
    pub top_count: u64,
    /// Revenue per month, January first
    #[serde(default)]
    pub monthly_sales: Vec<Decimal>,
}

/// Order counters for the manager dashboard (`GET /api/managers/order-stats`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    #[serde(default)]
    pub pending_orders: u64,
    #[serde(default)]
    pub in_progress_orders: u64,
    #[serde(default)]
    pub completed_orders: u64,
    #[serde(default)]
    pub cancelled_orders: u64,
    #[serde(default)]
    pub total_orders: u64,
}
