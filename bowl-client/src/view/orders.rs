//! Order cards, badges and the status filter

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use shared::models::{InvalidStatus, Order, OrderStatus};

use super::baht;

/// Visual status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub status: OrderStatus,
    pub icon: &'static str,
    pub label: &'static str,
}

impl From<OrderStatus> for StatusBadge {
    fn from(status: OrderStatus) -> Self {
        Self {
            status,
            icon: status.icon(),
            label: status.label(),
        }
    }
}

impl fmt::Display for StatusBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.label)
    }
}

/// Button offered on an order card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAction {
    pub order_id: i64,
    pub target: OrderStatus,
    pub label: &'static str,
}

impl OrderAction {
    fn label_for(target: OrderStatus) -> &'static str {
        match target {
            OrderStatus::InProgress => "Start preparing",
            OrderStatus::Finish => "Mark finished",
            OrderStatus::Cancelled => "Cancel",
            OrderStatus::Pending => "Reopen",
            OrderStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineView {
    pub item_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// One rendered order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCard {
    pub order_id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub order_date: Option<NaiveDateTime>,
    pub badge: StatusBadge,
    pub lines: Vec<OrderLineView>,
    pub total: Decimal,
    /// Empty for terminal orders
    pub actions: Vec<OrderAction>,
}

impl OrderCard {
    pub fn from_order(order: &Order) -> Self {
        let order_id = order.id();
        Self {
            order_id,
            customer_id: order.customer_id,
            customer_name: order
                .customer_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            order_date: order.order_date,
            badge: order.status.into(),
            lines: order
                .items
                .iter()
                .map(|item| OrderLineView {
                    item_name: item.item_name.clone(),
                    unit_price: item.item_price,
                    quantity: item.quantity,
                    line_total: item.line_total(),
                })
                .collect(),
            total: order.total_price,
            actions: order
                .status
                .allowed_transitions()
                .iter()
                .map(|&target| OrderAction {
                    order_id,
                    target,
                    label: OrderAction::label_for(target),
                })
                .collect(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn render_text(&self) -> String {
        let date = self
            .order_date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "no date".to_string());
        let mut out = format!(
            "Order #{}  {}\n  {} (ID: {})  {}\n",
            self.order_id, self.badge, self.customer_name, self.customer_id, date
        );
        if self.lines.is_empty() {
            out.push_str("  (no items)\n");
        }
        for line in &self.lines {
            out.push_str(&format!(
                "  {:<28} x{:<3} {}\n",
                line.item_name,
                line.quantity,
                baht(line.line_total)
            ));
        }
        out.push_str(&format!("  Total: {}\n", baht(self.total)));
        if self.actions.is_empty() {
            out.push_str("  Status can no longer change");
        } else {
            let actions: Vec<String> = self
                .actions
                .iter()
                .map(|a| format!("[{} → {}]", a.label, a.target))
                .collect();
            out.push_str(&format!("  {}", actions.join(" ")));
        }
        out
    }
}

/// Build cards newest first; orders without a date go last
pub fn order_cards(orders: &[Order]) -> Vec<OrderCard> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by(|a, b| newest_first(a.order_date, b.order_date));
    sorted.into_iter().map(OrderCard::from_order).collect()
}

fn newest_first(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Order list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    #[default]
    All,
    Status(OrderStatus),
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderFilter::All => true,
            OrderFilter::Status(status) => order.status == *status,
        }
    }
}

impl FromStr for OrderFilter {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(OrderFilter::All);
        }
        s.parse().map(OrderFilter::Status)
    }
}

/// Count of orders per status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderStatistics {
    pub pending: usize,
    pub in_progress: usize,
    pub finish: usize,
    pub cancelled: usize,
    /// Orders whose status this client does not recognise
    pub unknown: usize,
}

impl OrderStatistics {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut stats = Self::default();
        for order in orders {
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::InProgress => stats.in_progress += 1,
                OrderStatus::Finish => stats.finish += 1,
                OrderStatus::Cancelled => stats.cancelled += 1,
                OrderStatus::Unknown => stats.unknown += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.finish + self.cancelled + self.unknown
    }
}

impl fmt::Display for OrderStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pending: {}  In Progress: {}  Finish: {}  Cancelled: {}",
            self.pending, self.in_progress, self.finish, self.cancelled
        )?;
        if self.unknown > 0 {
            write!(f, "  Unknown: {}", self.unknown)?;
        }
        Ok(())
    }
}
