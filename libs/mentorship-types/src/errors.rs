use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes carried in JSON error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidCredentials,
    InvalidInput,
    NoSession,
    SessionExpired,
    InvalidToken,
    Forbidden,
    NotFound,
    BackendUnavailable,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidInput => "INVALID_INPUT",
            Self::NoSession => "NO_SESSION",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::BackendUnavailable => "BACKEND_UNAVAILABLE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reasons a session token fails to decode into claims.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token format: {0}")]
    Malformed(String),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Missing role claim")]
    MissingRole,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}
