//! Route authorization: who may render which path.
//!
//! Every path falls into one of three classes:
//! - excluded: never gated (API pass-through, static assets, health)
//! - public: login, signup, home and the unauthorized page
//! - protected: everything else; rendered only for a role owning a prefix
//!
//! Prefix ownership is segment-aware, so `/dashboard/admin` owns
//! `/dashboard/admin/users` but not `/dashboard/administrator`.

use std::collections::HashMap;

use mentorship_types::{Principal, Role};
use url::form_urlencoded;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// What the session knows about the current browser context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Verification has not resolved yet.
    #[default]
    Unknown,
    Anonymous,
    Authenticated(Principal),
}

impl SessionStatus {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SessionStatus::Authenticated(p) => Some(p),
            _ => None,
        }
    }
}

/// Gate state for one protected path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unknown,
    Anonymous,
    Authorized(Role),
    Forbidden(Role),
}

/// Outcome of the gate for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Verification still in flight; render nothing.
    Wait,
    Render,
    /// Anonymous visitor on a protected path; `next` is the path to return to.
    RedirectLogin { next: String },
    RedirectUnauthorized { role: Role, path: String },
    /// Authenticated visitor on login/signup.
    RedirectLanding(Role),
}

impl Decision {
    /// Where to send the browser, if anywhere.
    pub fn location(&self) -> Option<String> {
        match self {
            Decision::Wait | Decision::Render => None,
            Decision::RedirectLogin { next } => Some(login_location(Some(next))),
            Decision::RedirectUnauthorized { .. } => Some(UNAUTHORIZED_PATH.to_string()),
            Decision::RedirectLanding(role) => Some(role.landing_path().to_string()),
        }
    }
}

/// `/login`, optionally remembering where the visitor was headed.
pub fn login_location(next: Option<&str>) -> String {
    match next {
        Some(next) if next != HOME_PATH && next != LOGIN_PATH => {
            let encoded: String = form_urlencoded::byte_serialize(next.as_bytes()).collect();
            format!("{LOGIN_PATH}?next={encoded}")
        }
        _ => LOGIN_PATH.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathClass {
    Excluded,
    Public,
    Protected,
}

/// Static role → allowed-prefix table plus the public and excluded paths.
#[derive(Debug, Clone)]
pub struct RouteTable {
    prefixes: HashMap<Role, Vec<String>>,
    public: Vec<String>,
    excluded: Vec<String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        let prefixes = Role::ALL
            .into_iter()
            .map(|role| (role, vec![role.landing_path().to_string()]))
            .collect();

        Self {
            prefixes,
            public: [HOME_PATH, LOGIN_PATH, SIGNUP_PATH, UNAUTHORIZED_PATH]
                .map(String::from)
                .to_vec(),
            excluded: ["/api", "/auth", "/static", "/favicon.ico", "/health"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl RouteTable {
    /// Grant `role` an extra path prefix.
    pub fn allow(mut self, role: Role, prefix: &str) -> Self {
        self.prefixes
            .entry(role)
            .or_default()
            .push(normalize_path(prefix));
        self
    }

    /// Exempt a path prefix from gating altogether.
    pub fn exclude(mut self, prefix: &str) -> Self {
        self.excluded.push(normalize_path(prefix));
        self
    }

    pub fn prefixes(&self, role: Role) -> &[String] {
        self.prefixes.get(&role).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.classify(&normalize_path(path)) == PathClass::Public
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.classify(&normalize_path(path)) == PathClass::Excluded
    }

    pub fn allows(&self, role: Role, path: &str) -> bool {
        let path = normalize_path(path);
        self.prefixes(role).iter().any(|p| has_prefix(&path, p))
    }

    fn classify(&self, path: &str) -> PathClass {
        if self.excluded.iter().any(|p| has_prefix(path, p)) {
            PathClass::Excluded
        } else if self.public.iter().any(|p| p == path) {
            PathClass::Public
        } else {
            PathClass::Protected
        }
    }

    /// Gate state of `status` visiting the protected `path`.
    pub fn resolve(&self, status: &SessionStatus, path: &str) -> GateState {
        match status {
            SessionStatus::Unknown => GateState::Unknown,
            SessionStatus::Anonymous => GateState::Anonymous,
            SessionStatus::Authenticated(p) if self.allows(p.role, path) => {
                GateState::Authorized(p.role)
            }
            SessionStatus::Authenticated(p) => GateState::Forbidden(p.role),
        }
    }

    pub fn decide(&self, status: &SessionStatus, path: &str) -> Decision {
        let path = normalize_path(path);

        match self.classify(&path) {
            PathClass::Excluded => Decision::Render,
            PathClass::Public => match status {
                SessionStatus::Unknown => Decision::Wait,
                SessionStatus::Authenticated(p) if path == LOGIN_PATH || path == SIGNUP_PATH => {
                    Decision::RedirectLanding(p.role)
                }
                _ => Decision::Render,
            },
            PathClass::Protected => match self.resolve(status, &path) {
                GateState::Unknown => Decision::Wait,
                GateState::Anonymous => Decision::RedirectLogin { next: path },
                GateState::Authorized(_) => Decision::Render,
                GateState::Forbidden(role) => Decision::RedirectUnauthorized { role, path },
            },
        }
    }

    /// Accept a remembered `next` path only if it is local and `role` owns it.
    pub fn safe_next(&self, role: Role, next: &str) -> Option<String> {
        if !next.starts_with('/') || next.starts_with("//") || next.contains('\\') {
            return None;
        }
        let path = normalize_path(next);
        self.allows(role, &path).then_some(path)
    }
}

fn has_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Collapse empty, `.` and `..` segments and drop any query or fragment.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    format!("/{}", segments.join("/"))
}
