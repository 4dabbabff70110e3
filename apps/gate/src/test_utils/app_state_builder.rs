//! Test app state builder for HTTP-level integration testing.
//!
//! `TestAppStateBuilder` creates an `AppState` wired to an [`InMemoryBackend`]
//! instead of the real REST API.

use std::sync::Arc;

use mentorship_sdk::{ResourceClient, SessionVerifier, TokenDecoder, VerifyMode};

use crate::{
    adapters::http::{app_state::AppState, routes::route_table},
    infra::config::AppConfig,
    test_utils::{InMemoryBackend, TEST_SECRET, create_test_config},
};

pub struct TestAppStateBuilder {
    config: AppConfig,
    backend: InMemoryBackend,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            config: create_test_config(|_| {}),
            backend: InMemoryBackend::new(),
        }
    }

    pub fn with_config(mut self, overrides: impl FnOnce(&mut AppConfig)) -> Self {
        overrides(&mut self.config);
        self
    }

    pub fn trusting_claims(self) -> Self {
        self.with_config(|c| c.verify_mode = VerifyMode::TrustClaims)
    }

    pub fn with_backend_down(self) -> Self {
        self.backend.set_down(true);
        self
    }

    pub fn with_resource_status(self, status: u16) -> Self {
        *self.backend.resource_status.lock().unwrap() = Some(status);
        self
    }

    pub fn build(self) -> AppState {
        self.build_with_backend().0
    }

    /// Build and also hand back the backend for assertions.
    pub fn build_with_backend(self) -> (AppState, Arc<InMemoryBackend>) {
        let backend = Arc::new(self.backend);
        let decoder =
            TokenDecoder::with_secret(TEST_SECRET).leeway(self.config.token_leeway_secs);
        let verifier = SessionVerifier::new(decoder, self.config.verify_mode, backend.clone());

        let state = AppState {
            config: Arc::new(self.config),
            verifier: Arc::new(verifier),
            backend: backend.clone(),
            resources: ResourceClient::new(backend.clone()),
            routes: Arc::new(route_table()),
        };
        (state, backend)
    }
}
