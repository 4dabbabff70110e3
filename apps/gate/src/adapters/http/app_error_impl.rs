use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        match &self {
            AppError::BackendUnavailable(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed")
            }
            _ => tracing::debug!(error = %self, "Request rejected"),
        }

        let status = self.status_code();
        let code = self.code();
        match self {
            AppError::InvalidInput(msg) => error_resp(status, code, Some(msg)),
            _ => error_resp(status, code, None),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::NoSession => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BackendUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show inline on a form page.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidCredentials => "Invalid email or password".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NoSession => "Please log in again".to_string(),
            AppError::NotFound => "Not found".to_string(),
            AppError::BackendUnavailable(_) | AppError::Internal(_) => {
                "The service is unavailable right now. Please try again.".to_string()
            }
        }
    }
}

pub fn error_resp(status: StatusCode, code: ErrorCode, message: Option<String>) -> Response {
    let body = match message {
        Some(msg) => serde_json::json!({ "code": code.as_str(), "message": msg }),
        None => serde_json::json!({ "code": code.as_str() }),
    };
    (status, Json(body)).into_response()
}
