//! Client error types

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::StatusCode;
use shared::error::{ApiErrorBody, CartLimit, ErrorCategory, ErrorCode};
use shared::models::OrderStatus;
use thiserror::Error;

/// Longest slice of a raw body kept in an error
pub const BODY_PREVIEW_CHARS: usize = 200;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("{method} {path} timed out after {after:?}")]
    Timeout {
        method: String,
        path: String,
        after: Duration,
    },

    /// Authentication required (caller redirects to the role's login)
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate resource (409)
    #[error("Duplicate: {0}")]
    Conflict(String),

    /// Input rejected, by the server (400) or by client-side checks
    #[error("Validation error: {message}")]
    Validation {
        code: Option<ErrorCode>,
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    /// Any other non-success status
    #[error("Server error {status}: {message}")]
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },

    /// Body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Status change not offered from the current status
    #[error("Cannot change order from \"{from}\" to \"{to}\"")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No identity for the requested page
    #[error("Session error: {0}")]
    Session(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Map a non-success response to an error
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed = ApiErrorBody::parse(body);
        let code = parsed.as_ref().and_then(ApiErrorBody::error_code);
        let message = parsed
            .as_ref()
            .and_then(|b| b.message().map(str::to_string))
            .or_else(|| {
                let text = body.trim();
                (!text.is_empty() && parsed.is_none()).then(|| preview(text))
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            StatusCode::BAD_REQUEST => ClientError::Validation {
                code,
                message,
                field_errors: parsed.map(|b| b.field_errors).unwrap_or_default(),
            },
            _ => ClientError::Api {
                status: status.as_u16(),
                code,
                message,
            },
        }
    }

    /// Client-side rejection with a single message
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ClientError::Validation {
            code: None,
            message: message.into(),
            field_errors: BTreeMap::new(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// Structured server code, if the server sent one
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Validation { code, .. } | ClientError::Api { code, .. } => *code,
            _ => None,
        }
    }

    /// Domain of the failure: the server code's category when one was
    /// sent, otherwise derived from the variant
    pub fn category(&self) -> ErrorCategory {
        if let Some(code) = self.code() {
            return code.category();
        }
        match self {
            ClientError::Unauthorized | ClientError::Forbidden(_) | ClientError::Session(_) => {
                ErrorCategory::Auth
            }
            ClientError::Validation { .. } | ClientError::Conflict(_) => ErrorCategory::Validation,
            ClientError::InvalidTransition { .. } => ErrorCategory::Order,
            _ => ErrorCategory::System,
        }
    }

    /// Whether the server rejected a quantity for crossing a cart bound
    pub fn cart_limit(&self) -> Option<CartLimit> {
        let message = match self {
            ClientError::Validation { message, .. }
            | ClientError::Api { message, .. }
            | ClientError::Conflict(message)
            | ClientError::InvalidResponse(message) => Some(message.as_str()),
            _ => None,
        };
        CartLimit::classify(self.code(), message)
    }

    /// Text for a toast or alert
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(_) => "Cannot reach the server".into(),
            ClientError::Timeout { .. } => "The server took too long to respond".into(),
            ClientError::Unauthorized => "Please log in again".into(),
            ClientError::Forbidden(msg) => format!("Not allowed: {msg}"),
            ClientError::NotFound(msg) => format!("Not found: {msg}"),
            ClientError::Conflict(msg) => format!("Already exists: {msg}"),
            ClientError::Validation {
                message,
                field_errors,
                ..
            } => {
                if field_errors.is_empty() {
                    message.clone()
                } else {
                    let fields: Vec<String> = field_errors
                        .iter()
                        .map(|(field, err)| format!("{field}: {err}"))
                        .collect();
                    format!("{message} ({})", fields.join(", "))
                }
            }
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors: BTreeMap<String, String> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    (field.to_string(), message)
                })
            })
            .collect();
        let message = field_errors
            .values()
            .next()
            .cloned()
            .unwrap_or_else(|| "Invalid input".to_string());
        ClientError::Validation {
            code: Some(ErrorCode::ValidationFailed),
            message,
            field_errors,
        }
    }
}

/// First `BODY_PREVIEW_CHARS` characters of a body
pub fn preview(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(BODY_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(ClientError::from_response(StatusCode::UNAUTHORIZED, "").is_unauthorized());
        assert!(matches!(
            ClientError::from_response(StatusCode::NOT_FOUND, r#"{"error":"Customer not found"}"#),
            ClientError::NotFound(m) if m == "Customer not found"
        ));
        assert!(matches!(
            ClientError::from_response(StatusCode::CONFLICT, ""),
            ClientError::Conflict(m) if m == "Conflict"
        ));
        assert!(matches!(
            ClientError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            ClientError::Api { status: 500, code: None, message } if message == "boom"
        ));
    }

    #[test]
    fn test_validation_body() {
        let err = ClientError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"code":"VALIDATION_FAILED","message":"Invalid input","fieldErrors":{"name":"Menu name is required"}}"#,
        );
        assert_eq!(err.code(), Some(ErrorCode::ValidationFailed));
        assert_eq!(err.user_message(), "Invalid input (name: Menu name is required)");
    }

    #[test]
    fn test_cart_limit_from_legacy_text() {
        let err = ClientError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"code":"INVALID_CART_OPERATION","message":"Quantity cannot exceed 99"}"#,
        );
        assert_eq!(err.cart_limit(), Some(CartLimit::Maximum));

        let err = ClientError::from_response(StatusCode::BAD_REQUEST, "Quantity cannot be less than 1");
        assert_eq!(err.cart_limit(), Some(CartLimit::Minimum));

        let err = ClientError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"code":"QUANTITY_EXCEEDS_MAXIMUM","message":"nope"}"#,
        );
        assert_eq!(err.cart_limit(), Some(CartLimit::Maximum));
    }

    #[test]
    fn test_category() {
        let err = ClientError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"code":"UNAUTHORIZED_CART_ACCESS","message":"not yours"}"#,
        );
        assert_eq!(err.category(), ErrorCategory::Cart);
        assert_eq!(ClientError::Unauthorized.category(), ErrorCategory::Auth);
        assert_eq!(ClientError::invalid_input("Name is required").category(), ErrorCategory::Validation);
        let err = ClientError::InvalidTransition {
            from: OrderStatus::Finish,
            to: OrderStatus::Pending,
        };
        assert_eq!(err.category(), ErrorCategory::Order);
        assert_eq!(
            ClientError::from_response(StatusCode::BAD_GATEWAY, "").category(),
            ErrorCategory::System
        );
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(500);
        let p = preview(&long);
        assert_eq!(p.chars().count(), BODY_PREVIEW_CHARS + 1);
        assert_eq!(preview("short"), "short");
    }
}
