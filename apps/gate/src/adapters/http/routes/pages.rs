use axum::{
    Extension, Router,
    http::Uri,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use mentorship_sdk::{LOGIN_PATH, normalize_path};

use crate::adapters::http::{app_state::AppState, middleware::Session, views};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/unauthorized", get(unauthorized))
        .route("/dashboard/{role}", get(dashboard))
        .route("/dashboard/{role}/", get(dashboard))
        .route("/dashboard/{role}/{*rest}", get(dashboard))
}

async fn home(Extension(session): Extension<Session>) -> Html<String> {
    views::home_page(session.principal().as_ref())
}

async fn unauthorized(Extension(session): Extension<Session>) -> Html<String> {
    views::unauthorized_page(session.principal().as_ref())
}

/// Only reached after the gate has rendered the path for the principal's role.
async fn dashboard(Extension(session): Extension<Session>, uri: Uri) -> Response {
    let Some(principal) = session.principal() else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    let path = normalize_path(uri.path());
    let section = path
        .strip_prefix(principal.landing_path())
        .unwrap_or_default()
        .to_string();

    views::dashboard_page(&principal, &section).into_response()
}
