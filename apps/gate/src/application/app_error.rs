use mentorship_sdk::{BackendError, LoginError};
use thiserror::Error;

pub use mentorship_types::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No session")]
    NoSession,

    #[error("Not found")]
    NotFound,

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::NoSession => ErrorCode::NoSession,
            AppError::NotFound => ErrorCode::NotFound,
            AppError::BackendUnavailable(_) => ErrorCode::BackendUnavailable,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<LoginError> for AppError {
    fn from(e: LoginError) -> Self {
        match e {
            LoginError::InvalidCredentials => AppError::InvalidCredentials,
            LoginError::InvalidInput(msg) => AppError::InvalidInput(msg),
            LoginError::InvalidSession(e) => {
                AppError::BackendUnavailable(format!("unusable session issued: {e}"))
            }
            LoginError::Backend(e) => e.into(),
        }
    }
}

impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Unauthorized => AppError::NoSession,
            BackendError::Status { status: 404, .. } | BackendError::InvalidPath(_) => {
                AppError::NotFound
            }
            BackendError::Status { status: 400, message } => AppError::InvalidInput(message),
            other => AppError::BackendUnavailable(other.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use mentorship_sdk::SessionError;

    #[test]
    fn test_login_error_mapping() {
        assert!(matches!(
            AppError::from(LoginError::InvalidCredentials),
            AppError::InvalidCredentials
        ));
        assert!(matches!(
            AppError::from(LoginError::InvalidSession(SessionError::ExpiredToken)),
            AppError::BackendUnavailable(_)
        ));
        assert!(matches!(
            AppError::from(LoginError::Backend(BackendError::Unreachable("refused".into()))),
            AppError::BackendUnavailable(_)
        ));
    }

    #[test]
    fn test_codes() {
        assert_eq!(AppError::NoSession.code().as_str(), "NO_SESSION");
        assert_eq!(
            AppError::InvalidInput("x".into()).code().as_str(),
            "INVALID_INPUT"
        );
    }
}
