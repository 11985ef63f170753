//! View models
//!
//! Plain structs a front end renders, built only from the latest server
//! response. Text renderers are provided for consoles and tests.

pub mod bill;
pub mod cart;
pub mod chart;
pub mod orders;

pub use bill::BillRenderer;
pub use cart::{CartLineView, CartView};
pub use chart::MonthlyChart;
pub use orders::{OrderAction, OrderCard, OrderFilter, OrderStatistics, StatusBadge};

use rust_decimal::Decimal;

/// `฿60.00`
pub fn baht(amount: Decimal) -> String {
    format!("฿{:.2}", amount.round_dp(2))
}
