//! Server error vocabulary
//!
//! The ordering server answers failed requests with a JSON body such as
//! `{"code": "INVALID_CART_OPERATION", "message": "...", "timestamp": "..."}`
//! or, on older endpoints, `{"error": "..."}`. This module provides:
//!
//! - [`ErrorCode`]: the server's string codes as an enum
//! - [`ErrorCategory`]: grouping of codes by domain
//! - [`ApiErrorBody`]: lenient decoder for every body shape the server emits
//!
//! # Example
//!
//! ```
//! use shared::error::{ApiErrorBody, ErrorCategory, ErrorCode};
//!
//! let body = ApiErrorBody::parse(r#"{"code":"CART_ITEM_NOT_FOUND","message":"gone"}"#).unwrap();
//! assert_eq!(body.error_code(), Some(ErrorCode::CartItemNotFound));
//! assert_eq!(ErrorCode::CartItemNotFound.category(), ErrorCategory::Cart);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{ApiErrorBody, CartLimit};
