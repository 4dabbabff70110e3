pub mod api;
pub mod auth;
pub mod pages;

use axum::{Json, Router, routing::get};
use mentorship_sdk::RouteTable;
use serde_json::{Value, json};

use crate::adapters::http::app_state::AppState;

/// Gate rules for the routes served here.
///
/// `/logout` must work for every role and for stale sessions, so it bypasses the gate.
pub fn route_table() -> RouteTable {
    RouteTable::default().exclude("/logout")
}

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(auth::router())
        .nest("/api", api::router())
        .route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
