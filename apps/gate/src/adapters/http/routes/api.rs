//! Pass-through to the backend resource API.
//!
//! The bearer token is attached from the request's session. A backend 401
//! clears it; every other failure is relayed as `{error}` with the backend's
//! status.

use std::collections::HashMap;

use axum::{
    Extension, Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
};
use mentorship_sdk::{ApiResponse, BackendError, Resource, ResourceMethod};
use serde_json::Value;

use crate::{
    adapters::http::{app_state::AppState, middleware::Session},
    app_error::{AppError, AppResult},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{resource}", any(proxy))
        .route("/{resource}/{*rest}", any(proxy))
}

fn resource_method(method: &Method) -> Option<ResourceMethod> {
    match *method {
        Method::GET => Some(ResourceMethod::Get),
        Method::POST => Some(ResourceMethod::Post),
        Method::PUT => Some(ResourceMethod::Put),
        Method::PATCH => Some(ResourceMethod::Patch),
        Method::DELETE => Some(ResourceMethod::Delete),
        _ => None,
    }
}

fn relay_status(error: &BackendError) -> StatusCode {
    error
        .status()
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

async fn proxy(
    State(app_state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(params): Path<HashMap<String, String>>,
    method: Method,
    body: Bytes,
) -> AppResult<Response> {
    let resource: Resource = params
        .get("resource")
        .and_then(|r| r.parse().ok())
        .ok_or(AppError::NotFound)?;
    let rest = params.get("rest").map(String::as_str).unwrap_or_default();

    let Some(method) = resource_method(&method) else {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    };

    let body = if body.is_empty() {
        None
    } else {
        Some(
            serde_json::from_slice::<Value>(&body)
                .map_err(|e| AppError::InvalidInput(format!("Request body is not JSON: {e}")))?,
        )
    };

    let result = app_state
        .resources
        .call(session.stores(), resource, method, rest, body)
        .await;

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(BackendError::InvalidPath(path)) => {
            tracing::info!(%path, "refused resource path outside its collection");
            return Err(AppError::NotFound);
        }
        Err(e) => {
            tracing::debug!(error = %e, resource = resource.as_str(), "resource call failed");
            relay_status(e)
        }
    };

    Ok((status, Json(ApiResponse::from(result))).into_response())
}
