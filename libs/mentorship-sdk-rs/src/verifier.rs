//! Turns a stored token into a principal, or into "no session".

use std::{str::FromStr, sync::Arc};

use mentorship_types::{Principal, TokenDecoder};
use tracing::instrument;

use crate::{
    backend::AuthBackend,
    error::{BackendError, SessionError},
    store::TokenStore,
};

/// Who has the final word once a token decodes cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyMode {
    /// Ask the backend to confirm the session on every verification.
    Backend,
    /// Trust the decoded claims.
    TrustClaims,
}

impl FromStr for VerifyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backend" => Ok(VerifyMode::Backend),
            "claims" | "trust_claims" => Ok(VerifyMode::TrustClaims),
            other => Err(format!("unknown verify mode: {other}")),
        }
    }
}

pub struct SessionVerifier {
    decoder: TokenDecoder,
    mode: VerifyMode,
    backend: Option<Arc<dyn AuthBackend>>,
}

impl SessionVerifier {
    /// Verifier that only trusts decoded claims.
    pub fn trusting_claims(decoder: TokenDecoder) -> Self {
        Self {
            decoder,
            mode: VerifyMode::TrustClaims,
            backend: None,
        }
    }

    /// Verifier that confirms every decoded token with the backend.
    pub fn confirming_with(decoder: TokenDecoder, backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            decoder,
            mode: VerifyMode::Backend,
            backend: Some(backend),
        }
    }

    pub fn new(decoder: TokenDecoder, mode: VerifyMode, backend: Arc<dyn AuthBackend>) -> Self {
        match mode {
            VerifyMode::Backend => Self::confirming_with(decoder, backend),
            VerifyMode::TrustClaims => Self::trusting_claims(decoder),
        }
    }

    pub fn mode(&self) -> VerifyMode {
        self.mode
    }

    pub fn decoder(&self) -> &TokenDecoder {
        &self.decoder
    }

    /// Verify the token held by `store`.
    ///
    /// A token the verifier rejects is removed from the store, unless the
    /// store picked up a different token while verification was in flight.
    #[instrument(skip_all, fields(store = store.name()))]
    pub async fn verify(&self, store: &dyn TokenStore) -> Result<Principal, SessionError> {
        let Some(token) = store.load() else {
            return Err(SessionError::NoToken);
        };

        let result = self.verify_token(&token).await;

        if let Err(e) = &result
            && e.invalidates_token()
        {
            if store.load().as_deref() == Some(token.as_str()) {
                store.clear();
            }
            tracing::info!(reason = %e, "session token rejected");
        }

        result
    }

    /// Verify a token without touching any store.
    pub async fn verify_token(&self, token: &str) -> Result<Principal, SessionError> {
        let claims = self.decoder.decode(token)?;

        let Some(backend) = self.backend.as_ref().filter(|_| self.mode == VerifyMode::Backend)
        else {
            return Ok(Principal::from_claims(&claims));
        };

        let user = backend.verify(token).await.map_err(|e| match e {
            BackendError::Unauthorized => SessionError::Revoked,
            other => {
                tracing::warn!(error = %other, "backend could not confirm session");
                SessionError::BackendUnreachable(other.to_string())
            }
        })?;

        let principal = user.into_principal()?;
        if principal.role != claims.role {
            tracing::warn!(
                token_role = %claims.role,
                backend_role = %principal.role,
                "role changed under a live token"
            );
            return Err(SessionError::Revoked);
        }
        if principal.id != claims.user_id {
            tracing::warn!(
                token_user = %claims.user_id,
                backend_user = %principal.id,
                "backend confirmed a different user"
            );
            return Err(SessionError::Revoked);
        }

        Ok(principal)
    }
}
