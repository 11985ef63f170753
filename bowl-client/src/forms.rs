//! Form payloads with client-side validation
//!
//! Limits mirror the server's request validation so obviously bad input
//! is rejected before any request is sent.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{EMPLOYEE_POSITIONS, MENU_CATEGORIES, MenuItem};
use validator::{Validate, ValidationError};

/// Highest accepted menu price
pub const MAX_PRICE: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);

// ====== Menu ======

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemForm {
    #[validate(
        custom(function = "not_blank", message = "Menu name is required"),
        length(max = 100, message = "Menu name must not exceed 100 characters")
    )]
    pub name: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "valid_price"))]
    pub price: Decimal,

    #[validate(custom(function = "known_category"))]
    pub category: String,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: String,

    pub active: bool,
}

impl MenuItemForm {
    pub fn new(name: impl Into<String>, price: Decimal, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            category: category.into(),
            description: String::new(),
            active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl From<&MenuItem> for MenuItemForm {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price,
            category: item.category.clone(),
            description: item.description.clone().unwrap_or_default(),
            active: item.active,
        }
    }
}

// ====== Employees ======

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForm {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(custom(function = "known_position"))]
    pub position: String,

    #[validate(
        length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"),
        custom(function = "username_charset")
    )]
    pub username: String,

    #[validate(length(min = 6, max = 100, message = "Password must be between 6 and 100 characters"))]
    pub password: String,
}

/// Changes to an existing employee; credentials are not editable
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdateForm {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(custom(function = "known_position"))]
    pub position: String,
}

// ====== Auth ======

#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginForm {
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    pub username: String,
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    pub password: String,
}

impl LoginForm {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.trim().to_string(),
        }
    }
}

/// Customer self-registration (`POST /api/customers/register`)
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegistrationForm {
    #[validate(
        length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"),
        custom(function = "username_charset")
    )]
    pub username: String,

    #[validate(length(min = 6, max = 100, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: String,

    #[validate(email(message = "Email is invalid"))]
    pub email: String,

    #[validate(length(max = 20, message = "Phone must not exceed 20 characters"))]
    pub phone: String,
}

// ====== Custom validators ======

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn valid_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::new("price").with_message("Price must be a positive number".into()));
    }
    if *price > MAX_PRICE {
        return Err(ValidationError::new("price").with_message("Price must not exceed 9999.99".into()));
    }
    Ok(())
}

fn known_category(category: &str) -> Result<(), ValidationError> {
    if MENU_CATEGORIES.contains(&category) {
        return Ok(());
    }
    Err(ValidationError::new("category").with_message(
        format!("Category must be one of: {}", MENU_CATEGORIES.join(", ")).into(),
    ))
}

fn known_position(position: &str) -> Result<(), ValidationError> {
    if EMPLOYEE_POSITIONS.contains(&position) {
        return Ok(());
    }
    Err(ValidationError::new("position").with_message(
        format!("Position must be one of: {}", EMPLOYEE_POSITIONS.join(", ")).into(),
    ))
}

fn username_charset(username: &str) -> Result<(), ValidationError> {
    if username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Ok(());
    }
    Err(ValidationError::new("username")
        .with_message("Username can only contain letters, numbers, and underscores".into()))
}
