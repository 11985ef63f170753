// bowl-client/src/controllers/landing.rs
// Landing page - login / register and role redirect

use std::sync::Arc;

use shared::models::{CustomerAuth, EmployeeAuth, UserView};
use validator::Validate;

use crate::error::{ClientError, ClientResult};
use crate::forms::{LoginForm, RegistrationForm};
use crate::http::HttpClient;
use crate::notify::Notifier;
use crate::session::{Identity, Redirect, SessionCache, SessionContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

impl AuthTab {
    pub fn submit_label(&self) -> &'static str {
        match self {
            AuthTab::Login => "Log in",
            AuthTab::Register => "Register",
        }
    }

    /// Whether the registration-only fields are shown
    pub fn shows_registration_fields(&self) -> bool {
        matches!(self, AuthTab::Register)
    }
}

/// Successful login: who, and where to go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub session: SessionContext,
    pub redirect: Redirect,
}

pub struct LandingController<H> {
    http: H,
    notifier: Arc<dyn Notifier>,
    cache: Option<SessionCache>,
    tab: AuthTab,
}

impl<H: HttpClient> LandingController<H> {
    pub fn new(http: H, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            http,
            notifier,
            cache: None,
            tab: AuthTab::Login,
        }
    }

    pub fn with_cache(mut self, cache: SessionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn tab(&self) -> AuthTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: AuthTab) {
        self.tab = tab;
    }

    /// Last identity seen on this machine, for greeting only
    pub fn cached_identity(&self) -> Option<Identity> {
        self.cache.as_ref().and_then(SessionCache::load)
    }

    /// Customer login (`POST /api/customers/login`)
    pub async fn login_customer(&self, form: LoginForm) -> ClientResult<LoginOutcome> {
        self.check(&form)?;
        match self
            .http
            .post::<CustomerAuth, _>("/api/customers/login", &form)
            .await
        {
            Ok(auth) => {
                tracing::info!(customer_id = auth.customer_id, "customer logged in");
                Ok(self.complete(Identity::from_customer(&auth)))
            }
            Err(ClientError::Unauthorized) => {
                self.notifier.error("Invalid username or password");
                Err(ClientError::Unauthorized)
            }
            Err(e) => Err(super::fail(self.notifier.as_ref(), "Login failed", e)),
        }
    }

    /// Customer self-registration; logs the new customer in
    pub async fn register_customer(&self, form: RegistrationForm) -> ClientResult<LoginOutcome> {
        self.check(&form)?;
        match self
            .http
            .post::<CustomerAuth, _>("/api/customers/register", &form)
            .await
        {
            Ok(auth) => {
                tracing::info!(customer_id = auth.customer_id, "customer registered");
                self.notifier.success("Registration complete!");
                Ok(self.complete(Identity::from_customer(&auth)))
            }
            Err(ClientError::Conflict(msg)) => {
                self.notifier.error("This username is already taken");
                Err(ClientError::Conflict(msg))
            }
            Err(e) => Err(super::fail(self.notifier.as_ref(), "Registration failed", e)),
        }
    }

    /// Staff login (`POST /api/employees/login`)
    pub async fn login_employee(&self, form: LoginForm) -> ClientResult<LoginOutcome> {
        self.check(&form)?;
        match self
            .http
            .post::<EmployeeAuth, _>("/api/employees/login", &form)
            .await
        {
            Ok(auth) => {
                tracing::info!(employee_id = auth.id, "employee logged in");
                self.notifier.success(&format!("Welcome, {}", auth.name));
                Ok(self.complete(Identity::from_employee(&auth)))
            }
            Err(ClientError::Unauthorized) => {
                self.notifier.error("Invalid username or password");
                Err(ClientError::Unauthorized)
            }
            Err(e) => Err(super::fail(self.notifier.as_ref(), "Login failed", e)),
        }
    }

    /// Role-agnostic login (`POST /api/auth/login`), redirecting by role
    pub async fn login(&self, form: LoginForm) -> ClientResult<LoginOutcome> {
        self.check(&form)?;
        match self.http.post::<UserView, _>("/api/auth/login", &form).await {
            Ok(user) => {
                let identity = Identity::from_user_view(&user)
                    .map_err(|e| super::fail(self.notifier.as_ref(), "Login failed", e))?;
                tracing::info!(user_id = identity.id, role = %identity.role, "user logged in");
                Ok(self.complete(identity))
            }
            Err(ClientError::Unauthorized) => {
                self.notifier.error("Invalid username or password");
                Err(ClientError::Unauthorized)
            }
            Err(e) => Err(super::fail(self.notifier.as_ref(), "Login failed", e)),
        }
    }

    fn check<F: Validate>(&self, form: &F) -> ClientResult<()> {
        form.validate().map_err(|errors| {
            let err = ClientError::from(errors);
            tracing::warn!(error = %err, "form rejected");
            self.notifier.error(&err.user_message());
            err
        })
    }

    fn complete(&self, identity: Identity) -> LoginOutcome {
        if let Some(cache) = &self.cache
            && let Err(e) = cache.save(&identity)
        {
            tracing::warn!(error = %e, "failed to cache session identity");
        }
        LoginOutcome {
            redirect: identity.home(),
            session: SessionContext::new(identity),
        }
    }
}
