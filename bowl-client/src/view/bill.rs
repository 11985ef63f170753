use shared::models::Order;

use super::{StatusBadge, baht};

const SHOP_NAME: &str = "Bamee 5 Num";

/// Printable receipt for one order
pub struct BillRenderer<'a> {
    order: &'a Order,
    width: usize,
}

impl<'a> BillRenderer<'a> {
    pub fn new(order: &'a Order, width: usize) -> Self {
        Self {
            order,
            width: width.max(40),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(self.width);
        let thin = "-".repeat(self.width);

        out.push_str(&self.center(SHOP_NAME));
        out.push_str(&self.center("Receipt"));
        out.push_str(&rule);
        out.push('\n');

        // Header
        out.push_str(&self.line_lr("Order:", &format!("#{}", self.order.id())));
        out.push_str(&self.line_lr(
            "Customer:",
            self.order.customer_name.as_deref().unwrap_or("Unknown"),
        ));
        let date = self
            .order
            .order_date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "no date".to_string());
        out.push_str(&self.line_lr("Date:", &date));
        out.push_str(&self.line_lr("Status:", &StatusBadge::from(self.order.status).to_string()));
        out.push_str(&thin);
        out.push('\n');

        // ── Items ──
        let name_width = self.width.saturating_sub(4 + 5 + 11 + 12);
        out.push_str(&format!(
            "{:<4}{:<name_width$}{:>5}{:>11}{:>12}\n",
            "#", "Item", "Qty", "Price", "Total"
        ));
        for (index, item) in self.order.items.iter().enumerate() {
            let name: String = item.item_name.chars().take(name_width.saturating_sub(1)).collect();
            out.push_str(&format!(
                "{:<4}{:<name_width$}{:>5}{:>11}{:>12}\n",
                index + 1,
                name,
                item.quantity,
                baht(item.item_price),
                baht(item.line_total())
            ));
        }
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&self.line_lr("TOTAL:", &baht(self.order.total_price)));
        out.push('\n');
        out.push_str(&self.center("Thank you for dining with us"));
        out
    }

    fn center(&self, text: &str) -> String {
        format!("{:^width$}\n", text, width = self.width)
    }

    fn line_lr(&self, left: &str, right: &str) -> String {
        let used = left.chars().count() + right.chars().count();
        let gap = self.width.saturating_sub(used).max(1);
        format!("{left}{}{right}\n", " ".repeat(gap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{OrderItem, OrderStatus};

    #[test]
    fn test_bill_lines() {
        let order = Order {
            order_id: Some(12),
            customer_id: 3,
            customer_name: Some("Mali".into()),
            items: vec![
                OrderItem {
                    id: Some(1),
                    item_name: "Bamee Moo Daeng".into(),
                    item_price: Decimal::from(60),
                    quantity: 2,
                    subtotal: None,
                },
                OrderItem {
                    id: Some(2),
                    item_name: "Thai Tea".into(),
                    item_price: Decimal::from(35),
                    quantity: 1,
                    subtotal: None,
                },
            ],
            total_price: Decimal::from(155),
            status: OrderStatus::Finish,
            order_date: None,
        };
        let bill = BillRenderer::new(&order, 48).render();
        assert!(bill.contains("#12"));
        assert!(bill.contains("Mali"));
        assert!(bill.contains("฿120.00"));
        assert!(bill.contains("฿155.00"));
        assert!(bill.contains("Completed"));
        assert!(bill.trim_end().ends_with("Thank you for dining with us"));
    }
}
