//! Cart Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Smallest quantity a cart line may hold
pub const MIN_QUANTITY: u32 = 1;

/// Largest quantity a cart line may hold
pub const MAX_QUANTITY: u32 = 99;

/// One menu item plus quantity held against a customer's cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Cart line id (not the menu item id)
    pub id: i64,
    pub item_name: String,
    pub item_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    /// `item_price × quantity`
    pub fn subtotal(&self) -> Decimal {
        self.item_price * Decimal::from(self.quantity)
    }
}

/// Whether `quantity` lies within `[MIN_QUANTITY, MAX_QUANTITY]`
pub fn quantity_in_bounds(quantity: u32) -> bool {
    (MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity)
}

/// Sum of line subtotals
pub fn cart_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::subtotal).sum()
}

/// Sum of line quantities (the cart badge count)
pub fn cart_item_count(lines: &[CartLine]) -> u32 {
    lines.iter().map(|l| l.quantity).sum()
}
