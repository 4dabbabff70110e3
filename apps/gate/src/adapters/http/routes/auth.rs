use axum::{
    Extension, Form, Json, Router,
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use mentorship_sdk::{Credentials, ErrorCode, Principal, Registration, Role, SessionStatus};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    adapters::http::{
        app_state::AppState,
        middleware::Session,
        views::{self, LoginView, SignupView},
    },
    app_error::AppError,
};

#[derive(Deserialize, Default)]
struct LoginQuery {
    next: Option<String>,
    #[serde(default)]
    registered: bool,
}

#[derive(Deserialize)]
struct LoginForm {
    email: String,
    password: String,
    next: Option<String>,
}

#[derive(Deserialize)]
struct SignupForm {
    email: String,
    password: String,
    confirm_password: String,
    first_name: String,
    last_name: String,
    role: String,
}

#[derive(Serialize)]
struct SessionResponse {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    principal: Option<Principal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<ErrorCode>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/signup", get(signup_page).post(signup))
        .route("/logout", post(logout))
        .route("/auth/session", get(session_status))
}

async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    views::login_page(&LoginView {
        registered: query.registered,
        next: query.next.as_deref().filter(|n| !n.is_empty()),
        ..Default::default()
    })
}

#[instrument(skip_all)]
async fn login(Extension(session): Extension<Session>, Form(form): Form<LoginForm>) -> Response {
    let next = form.next.filter(|n| !n.is_empty());
    let credentials = Credentials::new(form.email, form.password);

    match session.login(&credentials, next.as_deref()).await {
        Ok(navigation) => Redirect::to(&navigation.to).into_response(),
        Err(e) => {
            let error = AppError::from(e);
            tracing::info!(error = %error, "login failed");
            let page = views::login_page(&LoginView {
                error: Some(&error.user_message()),
                next: next.as_deref(),
                email: &credentials.email,
                ..Default::default()
            });
            (error.status_code(), page).into_response()
        }
    }
}

async fn signup_page() -> Html<String> {
    views::signup_page(&SignupView::default())
}

#[instrument(skip_all)]
async fn signup(Extension(session): Extension<Session>, Form(form): Form<SignupForm>) -> Response {
    let role = form.role.parse::<Role>().ok();

    let result = match role {
        Some(role) => {
            let registration = Registration {
                email: form.email.trim().to_string(),
                password: form.password,
                confirm_password: form.confirm_password,
                first_name: form.first_name.trim().to_string(),
                last_name: form.last_name.trim().to_string(),
                role,
            };
            session.register(&registration).await.map_err(AppError::from)
        }
        None => Err(AppError::InvalidInput("Choose mentor or mentee".into())),
    };

    match result {
        Ok(navigation) => Redirect::to(&navigation.to).into_response(),
        Err(error) => {
            tracing::info!(error = %error, "signup failed");
            let page = views::signup_page(&SignupView {
                error: Some(&error.user_message()),
                email: form.email.trim(),
                first_name: form.first_name.trim(),
                last_name: form.last_name.trim(),
                role,
            });
            (error.status_code(), page).into_response()
        }
    }
}

async fn logout(Extension(session): Extension<Session>) -> Redirect {
    let navigation = session.logout().await;
    Redirect::to(&navigation.to)
}

/// Verify the current token and report the outcome. An invalid token is cleared.
async fn session_status(Extension(session): Extension<Session>) -> Json<SessionResponse> {
    let status = session.start().await;

    let response = match status {
        SessionStatus::Authenticated(principal) => SessionResponse {
            valid: true,
            principal: Some(principal),
            error_code: None,
        },
        _ => SessionResponse {
            valid: false,
            principal: None,
            error_code: session.last_error().map(|e| e.code()),
        },
    };

    Json(response)
}
