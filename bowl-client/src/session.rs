// bowl-client/src/session.rs
// Session identity - typed context plus an on-disk cache of the last login

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared::models::{CustomerAuth, EmployeeAuth, UserView};
use thiserror::Error;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Employee,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }

    /// Login page a 401 sends this role back to
    pub fn login_redirect(&self) -> Redirect {
        match self {
            Role::Customer => Redirect::Landing,
            Role::Employee => Redirect::EmployeeLogin,
            Role::Manager => Redirect::Landing,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            other => Err(ClientError::Session(format!("unknown role: {other}"))),
        }
    }
}

/// Where the front end should navigate next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    Landing,
    Login,
    EmployeeLogin,
    CustomerHome(i64),
    EmployeeOrders,
    EmployeeHome,
    ManagerHome,
}

impl Redirect {
    pub fn path(&self) -> String {
        match self {
            Redirect::Landing => "/".into(),
            Redirect::Login => "/login".into(),
            Redirect::EmployeeLogin => "/employee-login".into(),
            Redirect::CustomerHome(id) => format!("/customer/{id}"),
            Redirect::EmployeeOrders => "/employee-orders".into(),
            Redirect::EmployeeHome => "/employee".into(),
            Redirect::ManagerHome => "/manager".into(),
        }
    }
}

/// Who is logged in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    /// Employee position; empty for other roles
    #[serde(default)]
    pub position: String,
}

impl Identity {
    pub fn from_customer(auth: &CustomerAuth) -> Self {
        Self {
            id: auth.customer_id,
            username: auth.username.clone(),
            display_name: auth.username.clone(),
            role: Role::Customer,
            position: String::new(),
        }
    }

    pub fn from_employee(auth: &EmployeeAuth) -> Self {
        Self {
            id: auth.id,
            username: auth.username.clone(),
            display_name: auth.name.clone(),
            role: Role::Employee,
            position: auth.position.clone(),
        }
    }

    pub fn from_user_view(user: &UserView) -> ClientResult<Self> {
        Ok(Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name().to_string(),
            role: user.role.parse()?,
            position: String::new(),
        })
    }

    /// Home page after a successful login
    pub fn home(&self) -> Redirect {
        match self.role {
            Role::Customer => Redirect::CustomerHome(self.id),
            Role::Employee => Redirect::EmployeeOrders,
            Role::Manager => Redirect::ManagerHome,
        }
    }
}

/// Session context handed to every controller
///
/// Built from a login response or from server-rendered page data. The
/// server cookie stays the authority; this only says who the pages are for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    identity: Option<Identity>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }

    /// Identity, if it has `role`
    pub fn require(&self, role: Role) -> ClientResult<&Identity> {
        match &self.identity {
            Some(identity) if identity.role == role => Ok(identity),
            Some(identity) => Err(ClientError::Session(format!(
                "logged in as {}, page requires {role}",
                identity.role
            ))),
            None => Err(ClientError::Session(format!("no {role} is logged in"))),
        }
    }

    pub fn clear(&mut self) {
        self.identity = None;
    }
}

#[derive(Debug, Error)]
pub enum SessionCacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON file holding the last-known identity
///
/// Used to pre-fill greetings between runs. Never consulted for
/// authorization.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save(&self, identity: &Identity) -> Result<(), SessionCacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(identity)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Cached identity; unreadable or corrupt files count as empty
    pub fn load(&self) -> Option<Identity> {
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt session cache");
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn clear(&self) -> Result<(), SessionCacheError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
