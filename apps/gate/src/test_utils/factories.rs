//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use mentorship_sdk::{Role, SessionClaims, UserProfile, VerifyMode};
use mentorship_types::issue_token;
use secrecy::SecretString;
use serde_json::json;
use time::OffsetDateTime;

use crate::infra::config::AppConfig;

pub const TEST_SECRET: &str = "gate-test-secret";

/// Seeded users log in as `<role>@college.edu` / `<role>123`.
pub fn test_user_id(role: Role) -> &'static str {
    match role {
        Role::Admin => "1",
        Role::Mentor => "2",
        Role::Mentee => "3",
    }
}

/// Create a test config with sensible defaults.
pub fn create_test_config(overrides: impl FnOnce(&mut AppConfig)) -> AppConfig {
    let mut config = AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        backend_url: "http://backend.test/api".parse().unwrap(),
        jwt_secret: Some(SecretString::new(TEST_SECRET.into())),
        verify_mode: VerifyMode::Backend,
        token_leeway_secs: 0,
        cookie_secure: false,
        log_file: "gate-test.log".to_string(),
    };
    overrides(&mut config);
    config
}

/// Create claims for a seeded user, valid for an hour.
pub fn create_test_claims(role: Role, overrides: impl FnOnce(&mut SessionClaims)) -> SessionClaims {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let mut claims = SessionClaims {
        user_id: test_user_id(role).to_string(),
        role,
        email: Some(format!("{role}@college.edu")),
        name: None,
        exp: now + 3600,
        iat: Some(now),
    };
    overrides(&mut claims);
    claims
}

/// Create a backend user profile for a seeded user.
pub fn create_test_profile(role: Role, overrides: impl FnOnce(&mut UserProfile)) -> UserProfile {
    let mut first = role.as_str().to_string();
    first[..1].make_ascii_uppercase();
    let mut profile = UserProfile {
        id: json!(test_user_id(role).parse::<u64>().unwrap()),
        email: format!("{role}@college.edu"),
        role: role.as_str().to_string(),
        name: None,
        first_name: Some(first),
        last_name: Some("User".to_string()),
    };
    overrides(&mut profile);
    profile
}

pub fn sign(claims: &SessionClaims) -> String {
    issue_token(claims, TEST_SECRET.as_bytes()).unwrap()
}

pub fn token_for(role: Role) -> String {
    sign(&create_test_claims(role, |_| {}))
}

pub fn expired_token(role: Role) -> String {
    sign(&create_test_claims(role, |c| c.exp -= 7200))
}
