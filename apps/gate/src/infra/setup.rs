use crate::{
    adapters::http::{app_state::AppState, routes::route_table},
    infra::{config::AppConfig, error::InfraError, http_client::try_build_client},
};
use mentorship_sdk::{
    AuthBackend, HttpBackend, ResourceClient, SessionVerifier, TokenDecoder, VerifyMode,
};
use secrecy::ExposeSecret;
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    let http = try_build_client()?;
    let backend = Arc::new(HttpBackend::new(http, config.backend_url.clone()));

    let decoder = match &config.jwt_secret {
        Some(secret) => TokenDecoder::with_secret(secret.expose_secret().as_bytes()),
        None => TokenDecoder::unverified(),
    }
    .leeway(config.token_leeway_secs);

    if config.verify_mode == VerifyMode::TrustClaims && !decoder.verifies_signature() {
        tracing::warn!("VERIFY_MODE=claims without JWT_SECRET trusts unsigned claims");
    }

    let verifier = SessionVerifier::new(
        decoder,
        config.verify_mode,
        backend.clone() as Arc<dyn AuthBackend>,
    );

    tracing::info!(
        backend_url = %config.backend_url,
        verify_mode = ?config.verify_mode,
        "gate configured"
    );

    Ok(AppState {
        config: Arc::new(config),
        verifier: Arc::new(verifier),
        backend: backend.clone(),
        resources: ResourceClient::new(backend),
        routes: Arc::new(route_table()),
    })
}

pub fn init_tracing(log_file: &str) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mentorship_gate=debug,mentorship_sdk=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let file = File::create(log_file).map_err(|source| InfraError::LogFile {
        path: log_file.to_string(),
        source,
    })?;
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
