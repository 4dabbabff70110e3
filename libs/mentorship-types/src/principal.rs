use serde::{Deserialize, Serialize};

use crate::{Role, SessionClaims};

/// The authenticated identity and role derived from a validated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Principal {
    /// Project a principal straight from decoded claims.
    ///
    /// Tokens do not always carry a display name; the email (or the id when
    /// that is missing too) stands in for it.
    pub fn from_claims(claims: &SessionClaims) -> Self {
        let email = claims.email.clone().unwrap_or_default();
        let name = claims
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| {
                if email.is_empty() {
                    claims.user_id.clone()
                } else {
                    email.clone()
                }
            });

        Self {
            id: claims.user_id.clone(),
            name,
            email,
            role: claims.role,
        }
    }

    pub fn landing_path(&self) -> &'static str {
        self.role.landing_path()
    }
}
