//! HTTP implementation of the backend contract.

use async_trait::async_trait;
use mentorship_types::UserProfile;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::{
    backend::{
        AuthBackend, Credentials, LoginResponse, Registration, ResourceApi, ResourceMethod,
        VerifyResponse,
    },
    error::BackendError,
};

/// Talks to the backend REST API under `base_url`.
///
/// Endpoint paths are joined relative to the base, so
/// `http://localhost:8000/api` and `http://localhost:8000/api/` behave the same.
#[derive(Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Build from an existing client. The client should carry its own timeouts.
    pub fn new(http: reqwest::Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `path` segment by segment below the base URL. Segments are
    /// percent-encoded, never resolved, so `..` cannot climb above the base.
    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidPath(path.to_string()))?
            .pop_if_empty()
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> Result<RequestBuilder, BackendError> {
        let mut request = self.http.request(method, self.endpoint(path)?);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn send(request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Status {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

/// Pull a readable message out of an error body.
///
/// The backend answers with `{"error": ...}` or `{"detail": ...}`; anything
/// else falls back to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "detail", "message"]
                .iter()
                .find_map(|k| v.get(k).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}

fn http_method(method: ResourceMethod) -> Method {
    match method {
        ResourceMethod::Get => Method::GET,
        ResourceMethod::Post => Method::POST,
        ResourceMethod::Put => Method::PUT,
        ResourceMethod::Patch => Method::PATCH,
        ResourceMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl AuthBackend for HttpBackend {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, BackendError> {
        let request = self.request(Method::POST, "auth/login", None)?.json(credentials);
        Self::json(Self::send(request).await?).await
    }

    #[instrument(skip_all, fields(email = %registration.email))]
    async fn register(&self, registration: &Registration) -> Result<(), BackendError> {
        let request = self
            .request(Method::POST, "auth/register", None)?
            .json(registration);
        Self::send(request).await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn verify(&self, token: &str) -> Result<UserProfile, BackendError> {
        let request = self.request(Method::GET, "auth/verify", Some(token))?;
        let body: VerifyResponse = Self::json(Self::send(request).await?).await?;
        Ok(body.user)
    }

    #[instrument(skip_all)]
    async fn logout(&self, token: &str) -> Result<(), BackendError> {
        let request = self.request(Method::POST, "auth/logout", Some(token))?;
        Self::send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl ResourceApi for HttpBackend {
    #[instrument(skip(self, token, body))]
    async fn call(
        &self,
        method: ResourceMethod,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value, BackendError> {
        let mut request = self.request(http_method(method), path, token)?;
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = Self::send(request).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        Self::json(response).await
    }
}
