//! Monthly revenue bar chart

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::models::ReportSummary;

use super::baht;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Twelve bars of monthly revenue
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyChart {
    pub year: i32,
    pub bars: [Decimal; 12],
    pub total_revenue: Decimal,
    pub total_orders: u64,
    pub top_menu: Option<String>,
    pub top_count: u64,
}

impl MonthlyChart {
    /// Missing months count as zero; extra entries are ignored
    pub fn from_summary(year: i32, summary: &ReportSummary) -> Self {
        let mut bars = [Decimal::ZERO; 12];
        for (bar, value) in bars.iter_mut().zip(summary.monthly_sales.iter()) {
            *bar = *value;
        }
        Self {
            year,
            bars,
            total_revenue: summary.total_revenue,
            total_orders: summary.total_orders,
            top_menu: summary.top_menu.clone(),
            top_count: summary.top_count,
        }
    }

    pub fn max(&self) -> Decimal {
        self.bars.iter().copied().max().unwrap_or(Decimal::ZERO)
    }

    pub fn render_text(&self, width: usize) -> String {
        let max = self.max();
        let mut out = format!("Revenue {}\n", self.year);
        for (label, value) in MONTH_LABELS.iter().zip(self.bars.iter()) {
            let len = if max > Decimal::ZERO {
                (*value / max * Decimal::from(width))
                    .round()
                    .to_usize()
                    .unwrap_or(0)
            } else {
                0
            };
            out.push_str(&format!("{label} {:<width$} {}\n", "█".repeat(len), baht(*value)));
        }
        out.push_str(&format!(
            "Total revenue: {}  Orders: {}",
            baht(self.total_revenue),
            self.total_orders
        ));
        if let Some(top) = &self.top_menu {
            out.push_str(&format!("  Top item: {top} ({})", self.top_count));
        }
        out
    }
}
