use std::net::SocketAddr;

use env_helpers::get_env_default;
use mentorship_sdk::VerifyMode;
use secrecy::SecretString;
use url::Url;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Base of the backend REST API, e.g. `http://localhost:8000/api`.
    pub backend_url: Url,
    /// HS256 secret shared with the backend. Without it token signatures are
    /// not checked locally and the backend is the only authority.
    pub jwt_secret: Option<SecretString>,
    pub verify_mode: VerifyMode,
    pub token_leeway_secs: u64,
    /// Mark the session cookie `Secure`. Enable whenever the gate is served over HTTPS.
    pub cookie_secure: bool,
    pub log_file: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "127.0.0.1:3000".parse().unwrap());
        let backend_url: Url = get_env_default(
            "BACKEND_URL",
            "http://localhost:8000/api".parse().unwrap(),
        );
        let jwt_secret: Option<SecretString> = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| SecretString::new(s.into()));
        let verify_mode: VerifyMode = get_env_default("VERIFY_MODE", VerifyMode::Backend);
        let token_leeway_secs: u64 = get_env_default("TOKEN_LEEWAY_SECS", 0);
        let cookie_secure: bool = get_env_default("COOKIE_SECURE", false);
        let log_file: String = get_env_default("LOG_FILE", "gate.log".to_string());

        Self {
            bind_addr,
            backend_url,
            jwt_secret,
            verify_mode,
            token_leeway_secs,
            cookie_secure,
            log_file,
        }
    }
}
