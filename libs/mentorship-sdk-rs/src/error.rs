use mentorship_types::{ErrorCode, Role, TokenError};
use thiserror::Error;

/// Why a session could not produce a principal (or a path was refused).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No session token")]
    NoToken,

    #[error("Session token has expired")]
    ExpiredToken,

    #[error("Session token is malformed: {0}")]
    MalformedToken(String),

    #[error("Session token carries no known role")]
    UnknownRole(Option<String>),

    /// The backend answered 401 for this token.
    #[error("Session was revoked by the backend")]
    Revoked,

    #[error("Backend unreachable: {0}")]
    BackendUnreachable(String),

    #[error("Role {role} may not access {path}")]
    Forbidden { role: Role, path: String },
}

impl SessionError {
    /// Whether the stored token must be deleted everywhere.
    ///
    /// Only verdicts about the token itself qualify. An unreachable backend
    /// says nothing about the token, so the session fails closed for this
    /// check but keeps its token.
    pub fn invalidates_token(&self) -> bool {
        matches!(
            self,
            SessionError::ExpiredToken
                | SessionError::MalformedToken(_)
                | SessionError::UnknownRole(_)
                | SessionError::Revoked
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NoToken => ErrorCode::NoSession,
            SessionError::ExpiredToken | SessionError::Revoked => ErrorCode::SessionExpired,
            SessionError::MalformedToken(_) | SessionError::UnknownRole(_) => {
                ErrorCode::InvalidToken
            }
            SessionError::BackendUnreachable(_) => ErrorCode::BackendUnavailable,
            SessionError::Forbidden { .. } => ErrorCode::Forbidden,
        }
    }
}

impl From<TokenError> for SessionError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired => SessionError::ExpiredToken,
            TokenError::MissingRole => SessionError::UnknownRole(None),
            TokenError::UnknownRole(role) => SessionError::UnknownRole(Some(role)),
            TokenError::Malformed(_) | TokenError::InvalidSignature | TokenError::Encoding(_) => {
                SessionError::MalformedToken(e.to_string())
            }
        }
    }
}

/// Failures talking to the backend REST API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    /// Refused before anything was sent.
    #[error("Invalid resource path: {0}")]
    InvalidPath(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Unauthorized => Some(401),
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures of the login and signup flows.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backend issued a token this client cannot accept.
    #[error("Backend issued an unusable session: {0}")]
    InvalidSession(SessionError),

    #[error(transparent)]
    Backend(BackendError),
}

impl From<BackendError> for LoginError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Unauthorized => LoginError::InvalidCredentials,
            BackendError::Status {
                status: 400,
                message,
            } => LoginError::InvalidInput(message),
            other => LoginError::Backend(other),
        }
    }
}
