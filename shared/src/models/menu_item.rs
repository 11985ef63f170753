//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Categories accepted by the server for menu items
pub const MENU_CATEGORIES: [&str; 3] = ["Noodles", "Beverages", "Desserts"];

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Inactive items are hidden from customers
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl MenuItem {
    /// Whether `category` is one of [`MENU_CATEGORIES`]
    pub fn is_known_category(category: &str) -> bool {
        MENU_CATEGORIES.contains(&category)
    }
}
