//! Decoding of server error bodies

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Any error body the server may produce
///
/// Covers `{code, message, timestamp}`, `{errorCode, message}`,
/// `{error}` and validation failures carrying `fieldErrors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default, alias = "errorCode")]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub field_errors: BTreeMap<String, String>,
}

impl ApiErrorBody {
    /// Parse a raw body. Returns `None` for non-JSON or non-object bodies.
    pub fn parse(raw: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).ok()?;
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.code.as_deref().and_then(|c| c.parse().ok())
    }

    /// `message`, falling back to `error`
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|m| !m.trim().is_empty())
    }

    /// Cart-limit classification for a failed quantity write
    pub fn cart_limit(&self) -> Option<CartLimit> {
        CartLimit::classify(self.error_code(), self.message())
    }
}

/// Which quantity bound a rejected cart write hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartLimit {
    Maximum,
    Minimum,
}

impl CartLimit {
    /// Structured codes take precedence. Older servers only describe the
    /// limit in the message text, so the substrings are a fallback.
    pub fn classify(code: Option<ErrorCode>, message: Option<&str>) -> Option<Self> {
        match code {
            Some(ErrorCode::QuantityExceedsMaximum) => return Some(Self::Maximum),
            Some(ErrorCode::QuantityBelowMinimum) => return Some(Self::Minimum),
            _ => {}
        }
        let lower = message?.to_ascii_lowercase();
        if lower.contains("exceed") {
            Some(Self::Maximum)
        } else if lower.contains("less than 1") {
            Some(Self::Minimum)
        } else {
            None
        }
    }
}
