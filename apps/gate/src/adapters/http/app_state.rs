use std::sync::Arc;

use mentorship_sdk::{
    AuthBackend, ResourceClient, RouteTable, SessionManager, SessionVerifier, TokenStore,
};

use crate::infra::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub verifier: Arc<SessionVerifier>,
    pub backend: Arc<dyn AuthBackend>,
    pub resources: ResourceClient,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    /// A fresh session for one request, backed by `stores`.
    pub fn session(&self, stores: Arc<dyn TokenStore>) -> SessionManager {
        SessionManager::new(
            stores,
            self.verifier.clone(),
            self.backend.clone(),
            self.routes.clone(),
        )
    }
}
