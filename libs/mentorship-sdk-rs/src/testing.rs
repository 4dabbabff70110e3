//! In-memory backend and token fixtures for unit tests.

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use mentorship_types::{Role, SessionClaims, TokenDecoder, UserProfile, issue_token};
use serde_json::{Value, json};

use crate::{
    backend::{AuthBackend, Credentials, LoginResponse, Registration, ResourceApi, ResourceMethod},
    error::BackendError,
};

pub const SECRET: &[u8] = b"sdk-test-secret";

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

fn claims(role: Role, exp: i64) -> SessionClaims {
    SessionClaims {
        user_id: match role {
            Role::Mentor => "1001",
            Role::Mentee => "1002",
            Role::Admin => "1003",
        }
        .to_string(),
        role,
        email: Some(format!("{role}@college.edu")),
        name: None,
        exp,
        iat: Some(now()),
    }
}

pub fn token_for(role: Role) -> String {
    issue_token(&claims(role, now() + 3600), SECRET).unwrap()
}

pub fn expired_token(role: Role) -> String {
    issue_token(&claims(role, now() - 3600), SECRET).unwrap()
}

fn profile(role: Role) -> UserProfile {
    let mut first = role.as_str().to_string();
    first[..1].make_ascii_uppercase();
    UserProfile {
        id: json!(claims(role, 0).user_id),
        email: format!("{role}@college.edu"),
        role: role.as_str().to_string(),
        name: None,
        first_name: Some(first),
        last_name: Some("User".to_string()),
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Reachability {
    Up,
    RejectVerify,
    Down,
}

/// Backend double: `<role>@college.edu` / `<role>123` log in as `<role>`.
pub struct StubBackend {
    reachability: Reachability,
    reported_role: Option<Role>,
    reported_user: Option<String>,
    issued_token: Option<String>,
    verify_calls: AtomicUsize,
    logout_calls: AtomicUsize,
    registrations: Mutex<Vec<String>>,
    resource_calls: Mutex<Vec<(ResourceMethod, String, Option<String>)>>,
    resource_status: Option<u16>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            reachability: Reachability::Up,
            reported_role: None,
            reported_user: None,
            issued_token: None,
            verify_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            registrations: Mutex::new(vec![]),
            resource_calls: Mutex::new(vec![]),
            resource_status: None,
        }
    }

    pub fn rejecting_verify(mut self) -> Self {
        self.reachability = Reachability::RejectVerify;
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.reachability = Reachability::Down;
        self
    }

    pub fn reporting_role(mut self, role: Role) -> Self {
        self.reported_role = Some(role);
        self
    }

    /// Answer logins and verifications with this user id.
    pub fn reporting_user(mut self, id: &str) -> Self {
        self.reported_user = Some(id.to_string());
        self
    }

    pub fn issuing_token(mut self, token: impl Into<String>) -> Self {
        self.issued_token = Some(token.into());
        self
    }

    pub fn resource_status(mut self, status: u16) -> Self {
        self.resource_status = Some(status);
        self
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    pub fn registrations(&self) -> Vec<String> {
        self.registrations.lock().unwrap().clone()
    }

    pub fn resource_calls(&self) -> Vec<(ResourceMethod, String, Option<String>)> {
        self.resource_calls.lock().unwrap().clone()
    }

    fn profile(&self, role: Role) -> UserProfile {
        let mut user = profile(role);
        if let Some(id) = &self.reported_user {
            user.id = json!(id);
        }
        user
    }

    fn down(&self) -> Result<(), BackendError> {
        if self.reachability == Reachability::Down {
            return Err(BackendError::Unreachable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthBackend for StubBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, BackendError> {
        self.down()?;
        let role = Role::ALL
            .into_iter()
            .find(|r| {
                credentials.email == format!("{r}@college.edu")
                    && credentials.password == format!("{r}123")
            })
            .ok_or(BackendError::Unauthorized)?;

        Ok(LoginResponse {
            token: self.issued_token.clone().unwrap_or_else(|| token_for(role)),
            user: self.profile(role),
        })
    }

    async fn register(&self, registration: &Registration) -> Result<(), BackendError> {
        self.down()?;
        let mut registrations = self.registrations.lock().unwrap();
        if registrations.contains(&registration.email) {
            return Err(BackendError::Status {
                status: 400,
                message: "Email already registered".into(),
            });
        }
        registrations.push(registration.email.clone());
        Ok(())
    }

    async fn verify(&self, token: &str) -> Result<UserProfile, BackendError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.down()?;
        if self.reachability == Reachability::RejectVerify {
            return Err(BackendError::Unauthorized);
        }
        let claims = TokenDecoder::unverified()
            .decode(token)
            .map_err(|_| BackendError::Unauthorized)?;
        Ok(self.profile(self.reported_role.unwrap_or(claims.role)))
    }

    async fn logout(&self, _token: &str) -> Result<(), BackendError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.down()
    }
}

#[async_trait]
impl ResourceApi for StubBackend {
    async fn call(
        &self,
        method: ResourceMethod,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value, BackendError> {
        self.resource_calls.lock().unwrap().push((
            method,
            path.to_string(),
            token.map(str::to_string),
        ));
        self.down()?;
        match self.resource_status {
            Some(401) => Err(BackendError::Unauthorized),
            Some(status) => Err(BackendError::Status {
                status,
                message: format!("status {status}"),
            }),
            None => Ok(json!({ "path": path, "echo": body })),
        }
    }
}
