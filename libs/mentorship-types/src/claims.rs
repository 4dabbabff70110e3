use serde::{Deserialize, Serialize};

use crate::Role;

/// Validated claims of a session token.
///
/// Produced only by `TokenDecoder`, so the role is always a member of the
/// closed set and the expiry was checked at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (the backend's user id)
    pub user_id: String,

    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Token expiration (Unix timestamp)
    pub exp: i64,

    /// Token issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}
