//! Shared types for the Bowl restaurant client
//!
//! Wire models exchanged with the ordering server, the order status
//! state machine and the server's error vocabulary. Used by `bowl-client`
//! and anything else that speaks the same HTTP API.

pub mod error;
pub mod models;

// Re-exports
pub use error::{ApiErrorBody, CartLimit, ErrorCategory, ErrorCode};
pub use models::{CartLine, MenuItem, Order, OrderItem, OrderStatus};
pub use serde::{Deserialize, Serialize};
