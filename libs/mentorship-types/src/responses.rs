use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Principal, Role, TokenError};

/// User payload returned by the backend's login and verify endpoints.
///
/// The backend reports numeric ids and free-form role strings; both are
/// normalized by `into_principal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Value,

    pub email: String,

    pub role: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim)
            && !name.is_empty()
        {
            return name.to_string();
        }

        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if full.is_empty() {
            self.email.clone()
        } else {
            full
        }
    }

    pub fn into_principal(self) -> Result<Principal, TokenError> {
        let role: Role = self.role.parse()?;
        let id = match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let name = self.display_name();

        Ok(Principal {
            id,
            name,
            email: self.email,
            role,
        })
    }
}
