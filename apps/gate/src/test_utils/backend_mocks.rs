//! In-memory stand-in for the backend REST API.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use mentorship_sdk::{
    AuthBackend, BackendError, Credentials, LoginResponse, Registration, ResourceApi,
    ResourceMethod, Role, TokenDecoder, UserProfile,
};
use serde_json::{Value, json};

use super::factories::{create_test_claims, create_test_profile, sign};

pub type ResourceCall = (ResourceMethod, String, Option<String>);

/// Seeded with one user per role; see [`super::test_user_id`].
pub struct InMemoryBackend {
    pub users: Mutex<HashMap<String, (String, UserProfile)>>,
    pub registrations: Mutex<Vec<String>>,
    pub resource_calls: Mutex<Vec<ResourceCall>>,
    pub resource_status: Mutex<Option<u16>>,
    down: AtomicBool,
    logout_calls: AtomicUsize,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        let users = Role::ALL
            .into_iter()
            .map(|role| {
                (
                    format!("{role}@college.edu"),
                    (format!("{role}123"), create_test_profile(role, |_| {})),
                )
            })
            .collect();

        Self {
            users: Mutex::new(users),
            registrations: Mutex::new(vec![]),
            resource_calls: Mutex::new(vec![]),
            resource_status: Mutex::new(None),
            down: AtomicBool::new(false),
            logout_calls: AtomicUsize::new(0),
        }
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    pub fn registrations(&self) -> Vec<String> {
        self.registrations.lock().unwrap().clone()
    }

    pub fn resource_calls(&self) -> Vec<ResourceCall> {
        self.resource_calls.lock().unwrap().clone()
    }

    fn check_up(&self) -> Result<(), BackendError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(BackendError::Unreachable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthBackend for InMemoryBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, BackendError> {
        self.check_up()?;
        let users = self.users.lock().unwrap();
        let Some((password, profile)) = users.get(&credentials.email) else {
            return Err(BackendError::Unauthorized);
        };
        if *password != credentials.password {
            return Err(BackendError::Unauthorized);
        }
        let role: Role = profile.role.parse().map_err(|_| BackendError::Unauthorized)?;
        let user_id = match &profile.id {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        };
        let token = sign(&create_test_claims(role, |c| {
            c.user_id = user_id;
            c.email = Some(profile.email.clone());
        }));

        Ok(LoginResponse {
            token,
            user: profile.clone(),
        })
    }

    async fn register(&self, registration: &Registration) -> Result<(), BackendError> {
        self.check_up()?;
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&registration.email) {
            return Err(BackendError::Status {
                status: 400,
                message: "Email already registered".into(),
            });
        }
        let profile = create_test_profile(registration.role, |p| {
            p.id = json!(users.len() + 100);
            p.email = registration.email.clone();
            p.first_name = Some(registration.first_name.clone());
            p.last_name = Some(registration.last_name.clone());
        });
        users.insert(
            registration.email.clone(),
            (registration.password.clone(), profile),
        );
        self.registrations
            .lock()
            .unwrap()
            .push(registration.email.clone());
        Ok(())
    }

    async fn verify(&self, token: &str) -> Result<UserProfile, BackendError> {
        self.check_up()?;
        let claims = TokenDecoder::unverified()
            .decode(token)
            .map_err(|_| BackendError::Unauthorized)?;
        self.users
            .lock()
            .unwrap()
            .values()
            .map(|(_, profile)| profile)
            .find(|p| claims.email.as_deref() == Some(p.email.as_str()))
            .cloned()
            .ok_or(BackendError::Unauthorized)
    }

    async fn logout(&self, _token: &str) -> Result<(), BackendError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.check_up()
    }
}

#[async_trait]
impl ResourceApi for InMemoryBackend {
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
        self.check_up()?;
        match *self.resource_status.lock().unwrap() {
            Some(401) => Err(BackendError::Unauthorized),
            Some(status) => Err(BackendError::Status {
                status,
                message: format!("status {status}"),
            }),
            None => Ok(json!({ "path": path, "echo": body })),
        }
    }
}
