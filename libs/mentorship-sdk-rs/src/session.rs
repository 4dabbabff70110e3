//! The session held by one browser context.
//!
//! `SessionManager` owns the in-memory principal and is the only writer of
//! the token stores besides the verifier. It is shared as an `Arc` and passed
//! explicitly to whatever needs it; there is no global session.
//!
//! Login, logout and shutdown bump an epoch. A verification that started
//! under an older epoch is stale: its result is dropped instead of being
//! applied over the newer state.

use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicU64, Ordering},
};

use mentorship_types::Principal;
use tracing::instrument;

use crate::{
    backend::{AuthBackend, Credentials, Registration},
    error::{LoginError, SessionError},
    gate::{Decision, LOGIN_PATH, RouteTable, SessionStatus},
    store::TokenStore,
    verifier::SessionVerifier,
};

/// Where the UI should go after a flow completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: String,
}

impl Navigation {
    pub fn to(path: impl Into<String>) -> Self {
        Self { to: path.into() }
    }
}

/// Result of a verification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    Applied(SessionStatus),
    /// Superseded by a login, logout or shutdown; nothing was changed.
    Stale,
}

pub struct SessionManager {
    stores: Arc<dyn TokenStore>,
    verifier: Arc<SessionVerifier>,
    backend: Arc<dyn AuthBackend>,
    routes: Arc<RouteTable>,
    status: RwLock<SessionStatus>,
    last_error: RwLock<Option<SessionError>>,
    epoch: AtomicU64,
}

impl SessionManager {
    pub fn new(
        stores: Arc<dyn TokenStore>,
        verifier: Arc<SessionVerifier>,
        backend: Arc<dyn AuthBackend>,
        routes: Arc<RouteTable>,
    ) -> Self {
        Self {
            stores,
            verifier,
            backend,
            routes,
            status: RwLock::new(SessionStatus::Unknown),
            last_error: RwLock::new(None),
            epoch: AtomicU64::new(0),
        }
    }

    /// Resolve the initial session. Call once when the context starts.
    pub async fn start(&self) -> SessionStatus {
        match self.refresh().await {
            Refresh::Applied(status) => status,
            Refresh::Stale => self.status(),
        }
    }

    /// Drop the in-memory principal and return to `Unknown`.
    ///
    /// Stored tokens are left alone; the next `start` picks them up again.
    pub fn shutdown(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.set_status(SessionStatus::Unknown, None);
    }

    pub fn status(&self) -> SessionStatus {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn principal(&self) -> Option<Principal> {
        self.status().principal().cloned()
    }

    /// Why the last verification ended anonymous, if it did.
    pub fn last_error(&self) -> Option<SessionError> {
        self.last_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Every location this session's token lives in.
    pub fn stores(&self) -> &dyn TokenStore {
        self.stores.as_ref()
    }

    /// Run the gate for `path` against the current status.
    pub fn authorize(&self, path: &str) -> Decision {
        let decision = self.routes.decide(&self.status(), path);
        if let Decision::RedirectUnauthorized { role, path } = &decision {
            tracing::info!(
                error = %SessionError::Forbidden { role: *role, path: path.clone() },
                "path refused"
            );
        }
        decision
    }

    /// Verify the stored token and apply the outcome unless superseded.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Refresh {
        let ticket = self.epoch.load(Ordering::SeqCst);

        let result = self.verifier.verify(self.stores.as_ref()).await;

        if self.epoch.load(Ordering::SeqCst) != ticket {
            tracing::debug!("discarding stale verification");
            return Refresh::Stale;
        }

        let (status, error) = match result {
            Ok(principal) => (SessionStatus::Authenticated(principal), None),
            Err(e) => (SessionStatus::Anonymous, Some(e)),
        };
        self.set_status(status.clone(), error);
        Refresh::Applied(status)
    }

    /// Log in and navigate to `next` when the role owns it, else to the landing path.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(
        &self,
        credentials: &Credentials,
        next: Option<&str>,
    ) -> Result<Navigation, LoginError> {
        credentials.validate()?;

        let response = self.backend.login(credentials).await?;

        // The issued token must stand on its own. It has to decode, be
        // unexpired and name the same user and role the backend reports.
        let claims = self
            .verifier
            .decoder()
            .decode(&response.token)
            .map_err(|e| LoginError::InvalidSession(e.into()))?;
        let principal = response
            .user
            .into_principal()
            .map_err(|e| LoginError::InvalidSession(e.into()))?;
        if principal.role != claims.role {
            return Err(LoginError::InvalidSession(SessionError::UnknownRole(Some(
                principal.role.to_string(),
            ))));
        }
        if principal.id != claims.user_id {
            return Err(LoginError::InvalidSession(SessionError::Revoked));
        }

        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.stores.save(&response.token);
        let target = next
            .and_then(|n| self.routes.safe_next(principal.role, n))
            .unwrap_or_else(|| principal.landing_path().to_string());

        tracing::info!(user_id = %principal.id, role = %principal.role, "logged in");
        self.set_status(SessionStatus::Authenticated(principal), None);

        Ok(Navigation::to(target))
    }

    /// Tear down locally first, then tell the backend.
    ///
    /// The outcome never depends on the backend call.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Navigation {
        let token = self.stores.load();

        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.stores.clear();
        self.set_status(SessionStatus::Anonymous, None);

        if let Some(token) = token
            && let Err(e) = self.backend.logout(&token).await
        {
            tracing::warn!(error = %e, "backend logout failed; session already cleared locally");
        }

        Navigation::to(LOGIN_PATH)
    }

    #[instrument(
        skip(self, registration),
        fields(email = %registration.email, role = %registration.role)
    )]
    pub async fn register(&self, registration: &Registration) -> Result<Navigation, LoginError> {
        registration.validate()?;
        self.backend.register(registration).await?;
        tracing::info!("registered");
        Ok(Navigation::to(format!("{LOGIN_PATH}?registered=true")))
    }

    fn set_status(&self, status: SessionStatus, error: Option<SessionError>) {
        *self.status.write().unwrap_or_else(PoisonError::into_inner) = status;
        *self.last_error.write().unwrap_or_else(PoisonError::into_inner) = error;
    }
}
