//! Employee Model

use serde::{Deserialize, Serialize};

/// Positions accepted by the server when registering an employee
pub const EMPLOYEE_POSITIONS: [&str; 7] = [
    "Cleaner",
    "Cashier",
    "Cook",
    "Waiter",
    "Chef",
    "Server",
    "Manager Assistant",
];

/// Employee response (without password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Registration result (`POST /api/managers/employees`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreated {
    pub employee_id: i64,
    pub name: String,
    pub position: String,
    pub username: String,
    #[serde(default)]
    pub message: Option<String>,
}
