//! Customer and authentication models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Customer profile (`GET /api/customers/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl CustomerProfile {
    /// Name for greetings: full name if present, username otherwise
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Customer login / registration response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAuth {
    pub token: String,
    pub customer_id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub login_time: Option<NaiveDateTime>,
}

/// Employee login response (`POST /api/employees/login`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAuth {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: String,
    pub username: String,
}

/// Generic user view (`POST /api/auth/login`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// "customer", "employee" or "manager"
    #[serde(default)]
    pub role: String,
}

impl UserView {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback() {
        let mut profile = CustomerProfile {
            id: 1,
            username: "nok".into(),
            name: Some("  ".into()),
            email: None,
            phone: None,
        };
        assert_eq!(profile.display_name(), "nok");
        profile.name = Some("Nok Sriwan".into());
        assert_eq!(profile.display_name(), "Nok Sriwan");
    }

    #[test]
    fn test_customer_auth_decoding() {
        let json = r#"{"token":"t-1","customerId":42,"username":"nok","email":"nok@example.com","loginTime":"2024-05-01T09:15:00"}"#;
        let auth: CustomerAuth = serde_json::from_str(json).unwrap();
        assert_eq!(auth.customer_id, 42);
        assert!(auth.login_time.is_some());
    }
}
