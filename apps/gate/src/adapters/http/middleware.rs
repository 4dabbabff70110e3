use std::{ops::Deref, sync::Arc};

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use mentorship_sdk::{
    Decision, Headers, LOGIN_PATH, MemoryTokenStore, SessionManager, TokenStore, TokenStores,
    extract_from_header,
};

use crate::adapters::http::{app_state::AppState, cookie_store::CookieTokenStore, views};

/// The session of the current request, inserted by [`gate_middleware`].
#[derive(Clone)]
pub struct Session(pub Arc<SessionManager>);

impl Deref for Session {
    type Target = SessionManager;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// axum's header map as seen by the token extractors.
pub struct RequestHeaders<'a>(pub &'a HeaderMap);

impl Headers for RequestHeaders<'_> {
    fn get_authorization(&self) -> Option<&str> {
        self.0
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// Resolve the session and run the gate before any handler produces content.
///
/// Paths the route table excludes skip verification but still get a
/// [`Session`] so their handlers can read or clear the token. Cookie changes
/// made anywhere during the request are written back on the way out.
///
/// A request carrying `Authorization: Bearer` is judged on that token, but
/// the cookie stays registered as a second location so logout and rejection
/// clear both.
pub async fn gate_middleware(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let cookies = Arc::new(CookieTokenStore::new(jar, app_state.config.cookie_secure));
    let bearer = RequestHeaders(request.headers())
        .get_authorization()
        .and_then(extract_from_header)
        .map(str::to_owned);
    let stores: Arc<dyn TokenStore> = match bearer {
        Some(token) => Arc::new(
            TokenStores::new()
                .with(Arc::new(MemoryTokenStore::with_token(token)))
                .with(cookies.clone()),
        ),
        None => cookies.clone(),
    };
    let session = Arc::new(app_state.session(stores));
    let path = request.uri().path().to_owned();

    if !app_state.routes.is_excluded(&path) {
        session.start().await;

        match session.authorize(&path) {
            Decision::Render => {}
            Decision::Wait => {
                let page = (StatusCode::SERVICE_UNAVAILABLE, views::waiting_page());
                return (cookies.jar(), page).into_response();
            }
            decision => {
                let location = decision
                    .location()
                    .unwrap_or_else(|| LOGIN_PATH.to_string());
                tracing::debug!(%path, %location, "gate redirect");
                return (cookies.jar(), Redirect::to(&location)).into_response();
            }
        }
    }

    request.extensions_mut().insert(Session(session));
    let response = next.run(request).await;

    (cookies.jar(), response).into_response()
}
