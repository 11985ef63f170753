//! Error codes emitted by the ordering server
//!
//! Codes travel as SCREAMING_SNAKE_CASE strings. Anything the client does
//! not know decodes to [`ErrorCode::Unknown`] instead of failing.
//!
//! The current server only sends the codes its exception handler maps.
//! The remaining variants are not on the wire today: they are matched
//! when a finer-grained server sends them, and the client uses some of
//! them to label failures it detects itself (an empty cart, a rejected
//! status transition). Cart limits in particular still arrive as
//! `INVALID_CART_OPERATION` with the limit described in the message.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ==================== Sent by the server ====================
    CustomerNotFound,
    CustomerAlreadyExists,
    InvalidCredentials,
    CartItemNotFound,
    UnauthorizedCartAccess,
    InvalidCartOperation,
    InvalidArgument,
    ValidationFailed,
    ConstraintViolation,
    InvalidParameterType,
    DataIntegrityViolation,
    MethodNotSupported,
    EndpointNotFound,
    InternalServerError,

    // ==================== Not sent by the current server ====================
    /// Session missing or expired; the server answers a bare 401
    Unauthorized,
    EmployeeNotFound,
    /// Cart limits; the server reports these as `InvalidCartOperation`
    QuantityExceedsMaximum,
    QuantityBelowMinimum,
    OrderNotFound,
    /// Also used for transitions the client refuses before any request
    InvalidStatusTransition,
    /// Also used when an order is attempted with an empty cart
    EmptyCart,
    MenuItemNotFound,

    /// Any code this client does not recognise
    #[serde(other)]
    Unknown,
}

impl ErrorCode {
    /// Wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            ErrorCode::CustomerAlreadyExists => "CUSTOMER_ALREADY_EXISTS",
            ErrorCode::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::CartItemNotFound => "CART_ITEM_NOT_FOUND",
            ErrorCode::UnauthorizedCartAccess => "UNAUTHORIZED_CART_ACCESS",
            ErrorCode::InvalidCartOperation => "INVALID_CART_OPERATION",
            ErrorCode::QuantityExceedsMaximum => "QUANTITY_EXCEEDS_MAXIMUM",
            ErrorCode::QuantityBelowMinimum => "QUANTITY_BELOW_MINIMUM",
            ErrorCode::OrderNotFound => "ORDER_NOT_FOUND",
            ErrorCode::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            ErrorCode::EmptyCart => "EMPTY_CART",
            ErrorCode::MenuItemNotFound => "MENU_ITEM_NOT_FOUND",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::ConstraintViolation => "CONSTRAINT_VIOLATION",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::InvalidParameterType => "INVALID_PARAMETER_TYPE",
            ErrorCode::DataIntegrityViolation => "DATA_INTEGRITY_VIOLATION",
            ErrorCode::MethodNotSupported => "METHOD_NOT_SUPPORTED",
            ErrorCode::EndpointNotFound => "ENDPOINT_NOT_FOUND",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
            ErrorCode::Unknown => "UNKNOWN",
        }
    }

    /// Developer-facing English message
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::CustomerAlreadyExists => "Username is already taken",
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::Unauthorized => "Please log in first",
            ErrorCode::CartItemNotFound => "Cart item not found",
            ErrorCode::UnauthorizedCartAccess => "Cart belongs to another customer",
            ErrorCode::InvalidCartOperation => "Invalid cart operation",
            ErrorCode::QuantityExceedsMaximum => "Quantity cannot exceed 99",
            ErrorCode::QuantityBelowMinimum => "Quantity cannot be less than 1",
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidStatusTransition => "Status change is not allowed",
            ErrorCode::EmptyCart => "Cart is empty",
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::ValidationFailed => "Input validation failed",
            ErrorCode::ConstraintViolation => "Constraint validation failed",
            ErrorCode::InvalidArgument => "Invalid argument",
            ErrorCode::InvalidParameterType => "Invalid parameter type",
            ErrorCode::DataIntegrityViolation => "Data already exists",
            ErrorCode::MethodNotSupported => "HTTP method not supported",
            ErrorCode::EndpointNotFound => "Endpoint not found",
            ErrorCode::InternalServerError => "Unexpected server error",
            ErrorCode::Unknown => "Unknown error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = std::convert::Infallible;

    /// Never fails; unknown codes map to [`ErrorCode::Unknown`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let quoted = serde_json::Value::String(s.trim().to_ascii_uppercase());
        Ok(serde_json::from_value(quoted).unwrap_or(ErrorCode::Unknown))
    }
}
