//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Domain an [`ErrorCode`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Login, registration, session
    Auth,
    /// Cart lines and quantities
    Cart,
    /// Order placement and status
    Order,
    /// Menu items
    Menu,
    /// Field-level input problems
    Validation,
    /// Malformed requests, routing, server faults
    System,
}

impl ErrorCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Cart => "cart",
            Self::Order => "order",
            Self::Menu => "menu",
            Self::Validation => "validation",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::InvalidCredentials
            | ErrorCode::CustomerNotFound
            | ErrorCode::CustomerAlreadyExists
            | ErrorCode::EmployeeNotFound
            | ErrorCode::Unauthorized => ErrorCategory::Auth,

            ErrorCode::CartItemNotFound
            | ErrorCode::UnauthorizedCartAccess
            | ErrorCode::InvalidCartOperation
            | ErrorCode::QuantityExceedsMaximum
            | ErrorCode::QuantityBelowMinimum => ErrorCategory::Cart,

            ErrorCode::OrderNotFound
            | ErrorCode::InvalidStatusTransition
            | ErrorCode::EmptyCart => ErrorCategory::Order,

            ErrorCode::MenuItemNotFound => ErrorCategory::Menu,

            ErrorCode::ValidationFailed
            | ErrorCode::ConstraintViolation
            | ErrorCode::InvalidArgument
            | ErrorCode::InvalidParameterType => ErrorCategory::Validation,

            ErrorCode::DataIntegrityViolation
            | ErrorCode::MethodNotSupported
            | ErrorCode::EndpointNotFound
            | ErrorCode::InternalServerError
            | ErrorCode::Unknown => ErrorCategory::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::InvalidCredentials.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::QuantityBelowMinimum.category(), ErrorCategory::Cart);
        assert_eq!(ErrorCode::InvalidStatusTransition.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::MenuItemNotFound.category(), ErrorCategory::Menu);
        assert_eq!(ErrorCode::ConstraintViolation.category(), ErrorCategory::Validation);
        assert_eq!(ErrorCode::Unknown.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Cart).unwrap();
        assert_eq!(json, "\"cart\"");
        let category: ErrorCategory = serde_json::from_str("\"validation\"").unwrap();
        assert_eq!(category, ErrorCategory::Validation);
        assert_eq!(category.name(), "validation");
    }
}
