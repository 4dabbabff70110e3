use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TokenError;

/// The closed set of dashboard roles.
///
/// Parsing is case-insensitive and rejects anything outside the set, so a
/// `Role` value is always one the gate knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    Admin,
    Mentor,
    Mentee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Mentor, Role::Mentee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Mentor => "mentor",
            Role::Mentee => "mentee",
        }
    }

    /// Path a freshly authenticated principal of this role is sent to.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Role::Admin => "/dashboard/admin",
            Role::Mentor => "/dashboard/mentor",
            Role::Mentee => "/dashboard/mentee",
        }
    }

    /// Roles a visitor may pick for themselves on the signup form.
    pub fn is_self_registrable(&self) -> bool {
        matches!(self, Role::Mentor | Role::Mentee)
    }
}

impl FromStr for Role {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "mentor" => Ok(Role::Mentor),
            "mentee" => Ok(Role::Mentee),
            other => Err(TokenError::UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Mentor".parse::<Role>().unwrap(), Role::Mentor);
        assert_eq!(" ADMIN ".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("mentee".parse::<Role>().unwrap(), Role::Mentee);
    }

    #[test]
    fn test_parse_rejects_unknown_roles() {
        assert!(matches!(
            "superuser".parse::<Role>(),
            Err(TokenError::UnknownRole(r)) if r == "superuser"
        ));
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_landing_paths() {
        assert_eq!(Role::Admin.landing_path(), "/dashboard/admin");
        assert_eq!(Role::Mentor.landing_path(), "/dashboard/mentor");
        assert_eq!(Role::Mentee.landing_path(), "/dashboard/mentee");
    }

    #[test]
    fn test_serde_uses_lowercase_and_validates() {
        assert_eq!(serde_json::to_string(&Role::Mentee).unwrap(), r#""mentee""#);
        let parsed: Role = serde_json::from_str(r#""MENTOR""#).unwrap();
        assert_eq!(parsed, Role::Mentor);
        assert!(serde_json::from_str::<Role>(r#""guest""#).is_err());
    }

    #[test]
    fn test_admin_cannot_self_register() {
        assert!(!Role::Admin.is_self_registrable());
        assert!(Role::Mentor.is_self_registrable());
        assert!(Role::Mentee.is_self_registrable());
    }
}
