use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::Deserialize;

use crate::{Role, SessionClaims, TokenError};

/// Claims as they appear on the wire, before role validation.
#[derive(Deserialize)]
struct RawClaims {
    #[serde(alias = "sub")]
    user_id: Subject,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    exp: i64,
    #[serde(default)]
    iat: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Subject {
    Number(i64),
    Text(String),
}

impl Subject {
    fn into_string(self) -> String {
        match self {
            Subject::Number(n) => n.to_string(),
            Subject::Text(s) => s,
        }
    }
}

/// Decodes session tokens into validated claims.
///
/// With a secret the HS256 signature is checked. Without one the payload is
/// read unverified and the backend is expected to confirm the session.
/// Expiry is always enforced.
#[derive(Clone)]
pub struct TokenDecoder {
    secret: Option<Vec<u8>>,
    leeway_secs: u64,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("verifies_signature", &self.secret.is_some())
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

impl TokenDecoder {
    pub fn unverified() -> Self {
        Self {
            secret: None,
            leeway_secs: 0,
        }
    }

    pub fn with_secret(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: Some(secret.as_ref().to_vec()),
            leeway_secs: 0,
        }
    }

    pub fn leeway(mut self, secs: u64) -> Self {
        self.leeway_secs = secs;
        self
    }

    pub fn verifies_signature(&self) -> bool {
        self.secret.is_some()
    }

    /// Decode a token, rejecting expired tokens and roles outside the closed set.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;
        validation.validate_aud = false;

        let key = match &self.secret {
            Some(secret) => DecodingKey::from_secret(secret),
            None => {
                validation.insecure_disable_signature_validation();
                // Key is ignored when signature validation is disabled
                DecodingKey::from_secret(b"ignored")
            }
        };

        let raw = decode::<RawClaims>(token.trim(), &key, &validation)
            .map_err(map_jwt_error)?
            .claims;

        let role: Role = raw.role.ok_or(TokenError::MissingRole)?.parse()?;

        Ok(SessionClaims {
            user_id: raw.user_id.into_string(),
            role,
            email: raw.email,
            name: raw.name,
            exp: raw.exp,
            iat: raw.iat,
        })
    }
}

fn map_jwt_error(e: jsonwebtoken::errors::Error) -> TokenError {
    match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed(e.to_string()),
    }
}

/// Sign claims into an HS256 session token in the backend's format.
pub fn issue_token(claims: &SessionClaims, secret: &[u8]) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}
