//! Contract with the backend REST API.

use std::str::FromStr;

use async_trait::async_trait;
use mentorship_types::{Role, UserProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::ValidateEmail;

use crate::error::{BackendError, LoginError};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), LoginError> {
        if !is_valid_email(&self.email) {
            return Err(LoginError::InvalidInput("Enter a valid email address".into()));
        }
        if self.password.is_empty() {
            return Err(LoginError::InvalidInput("Password is required".into()));
        }
        Ok(())
    }
}

/// Self-service signup request.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl Registration {
    pub fn validate(&self) -> Result<(), LoginError> {
        if !is_valid_email(&self.email) {
            return Err(LoginError::InvalidInput("Enter a valid email address".into()));
        }
        if self.password.is_empty() {
            return Err(LoginError::InvalidInput("Password is required".into()));
        }
        if self.password != self.confirm_password {
            return Err(LoginError::InvalidInput("Passwords do not match".into()));
        }
        if !self.role.is_self_registrable() {
            return Err(LoginError::InvalidInput(format!(
                "Cannot sign up as {}",
                self.role
            )));
        }
        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    pub user: UserProfile,
}

/// Authentication endpoints of the backend.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, BackendError>;

    /// `POST /auth/register`
    async fn register(&self, registration: &Registration) -> Result<(), BackendError>;

    /// `GET /auth/verify`
    async fn verify(&self, token: &str) -> Result<UserProfile, BackendError>;

    /// `POST /auth/logout`
    async fn logout(&self, token: &str) -> Result<(), BackendError>;
}

/// Backend resource collections reachable through the pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Meetings,
    Messages,
    Achievements,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Meetings => "meetings",
            Resource::Messages => "messages",
            Resource::Achievements => "achievements",
        }
    }
}

impl FromStr for Resource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(Resource::Users),
            "meetings" => Ok(Resource::Meetings),
            "messages" => Ok(Resource::Messages),
            "achievements" => Ok(Resource::Achievements),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Generic CRUD call against a backend resource path.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn call(
        &self,
        method: ResourceMethod,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value, BackendError>;
}

/// `{data}` or `{error}`, the envelope resource calls are answered with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiResponse {
    Data(Value),
    Error(String),
}

impl From<Result<Value, BackendError>> for ApiResponse {
    fn from(result: Result<Value, BackendError>) -> Self {
        match result {
            Ok(data) => ApiResponse::Data(data),
            Err(BackendError::Status { message, .. }) => ApiResponse::Error(message),
            Err(e) => ApiResponse::Error(e.to_string()),
        }
    }
}
