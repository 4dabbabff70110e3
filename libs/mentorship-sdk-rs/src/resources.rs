//! Authenticated calls against backend resource collections.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::{
    backend::{Resource, ResourceApi, ResourceMethod},
    error::BackendError,
    store::TokenStore,
};

/// Attaches the stored token to resource calls.
///
/// A 401 from the backend means the token is dead, so the stores are cleared
/// and the next gate pass sends the visitor to login. Any other failure is
/// handed back unchanged.
#[derive(Clone)]
pub struct ResourceClient {
    api: Arc<dyn ResourceApi>,
}

impl ResourceClient {
    pub fn new(api: Arc<dyn ResourceApi>) -> Self {
        Self { api }
    }

    #[instrument(skip(self, stores, resource, body), fields(resource = resource.as_str()))]
    pub async fn call(
        &self,
        stores: &dyn TokenStore,
        resource: Resource,
        method: ResourceMethod,
        rest: &str,
        body: Option<Value>,
    ) -> Result<Value, BackendError> {
        let path = resource_path(resource, rest)?;
        let token = stores.load();

        let result = self.api.call(method, &path, token.as_deref(), body).await;

        if let Err(BackendError::Unauthorized) = &result
            && let Some(token) = token
        {
            if stores.load().as_deref() == Some(token.as_str()) {
                stores.clear();
            }
            tracing::info!("backend rejected session token on resource call");
        }

        result
    }
}

/// Join `rest` below the resource collection.
///
/// Every segment must be a plain name so the call can never leave the
/// collection once the backend URL is resolved.
fn resource_path(resource: Resource, rest: &str) -> Result<String, BackendError> {
    let rest = rest.trim_matches('/');
    if rest.is_empty() {
        return Ok(resource.as_str().to_string());
    }

    let plain = |segment: &str| {
        !matches!(segment, "" | "." | "..") && !segment.contains(['\\', '%', '?', '#'])
    };
    if !rest.split('/').all(plain) {
        return Err(BackendError::InvalidPath(format!("{}/{rest}", resource.as_str())));
    }

    Ok(format!("{}/{rest}", resource.as_str()))
}
