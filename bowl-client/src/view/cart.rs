//! Cart view

use rust_decimal::Decimal;
use shared::models::{CartLine, MAX_QUANTITY, MIN_QUANTITY, cart_item_count, cart_total};

use super::baht;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLineView {
    pub id: i64,
    pub item_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
    /// Decrement button enabled
    pub can_decrement: bool,
    /// Increment button enabled
    pub can_increment: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Decimal,
    /// Badge count: sum of quantities
    pub item_count: u32,
}

impl CartView {
    /// Build from a server response; nothing is carried over from earlier renders
    pub fn from_lines(lines: &[CartLine]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|line| CartLineView {
                    id: line.id,
                    item_name: line.item_name.clone(),
                    unit_price: line.item_price,
                    quantity: line.quantity,
                    subtotal: line.subtotal(),
                    can_decrement: line.quantity > MIN_QUANTITY,
                    can_increment: line.quantity < MAX_QUANTITY,
                })
                .collect(),
            total: cart_total(lines),
            item_count: cart_item_count(lines),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, id: i64) -> Option<&CartLineView> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn render_text(&self) -> String {
        if self.is_empty() {
            return "Your cart is empty".to_string();
        }
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&format!(
                "[{:>4}] {:<28} {} × {:<2} = {}\n",
                line.id,
                line.item_name,
                baht(line.unit_price),
                line.quantity,
                baht(line.subtotal)
            ));
        }
        out.push_str(&format!("Items: {}  Total: {}", self.item_count, baht(self.total)));
        out
    }
}
