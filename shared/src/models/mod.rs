//! Data models
//!
//! Plain records exchanged with the server. The server owns their
//! lifecycle; the client only holds the copy from the latest fetch.
//! Wire names are camelCase.

pub mod cart;
pub mod customer;
pub mod employee;
pub mod menu_item;
pub mod order;
pub mod report;

// Re-exports
pub use cart::*;
pub use customer::*;
pub use employee::*;
pub use menu_item::*;
pub use order::*;
pub use report::*;
