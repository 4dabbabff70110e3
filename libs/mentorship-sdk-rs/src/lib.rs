//! Session handling for the mentorship dashboard.
//!
//! # Features
//!
//! - **Session verification** - Decode the stored JWT and optionally confirm it with the backend
//! - **Route gating** - Decide per path whether to render, wait, or redirect
//! - **Login / logout / signup** - Flows that keep every token store consistent
//! - **Resource calls** - Authenticated pass-through to backend collections
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mentorship_sdk::{
//!     Decision, HttpBackend, MemoryTokenStore, RouteTable, SessionManager, SessionVerifier,
//!     TokenDecoder,
//! };
//!
//! let backend = Arc::new(HttpBackend::new(reqwest::Client::new(), base_url));
//! let verifier = SessionVerifier::confirming_with(TokenDecoder::unverified(), backend.clone());
//! let session = SessionManager::new(
//!     Arc::new(MemoryTokenStore::new()),
//!     Arc::new(verifier),
//!     backend,
//!     Arc::new(RouteTable::default()),
//! );
//!
//! session.start().await;
//! match session.authorize("/dashboard/mentor") {
//!     Decision::Render => { /* show the page */ }
//!     other => println!("go to {:?}", other.location()),
//! }
//! ```

mod backend;
#[cfg(feature = "client")]
mod client;
mod error;
mod extract;
mod gate;
mod resources;
mod session;
mod store;
mod verifier;

#[cfg(test)]
mod testing;

pub use backend::{
    ApiResponse, AuthBackend, Credentials, LoginResponse, Registration, Resource, ResourceApi,
    ResourceMethod, VerifyResponse,
};
#[cfg(feature = "client")]
pub use client::HttpBackend;
pub use error::{BackendError, LoginError, SessionError};
pub use extract::{Headers, extract_from_header};
pub use gate::{
    Decision, GateState, HOME_PATH, LOGIN_PATH, RouteTable, SIGNUP_PATH, SessionStatus,
    UNAUTHORIZED_PATH, login_location, normalize_path,
};
pub use resources::ResourceClient;
pub use session::{Navigation, Refresh, SessionManager};
pub use store::{MemoryTokenStore, TOKEN_KEY, TokenStore, TokenStores};
pub use verifier::{SessionVerifier, VerifyMode};

// Re-export shared types for convenience
pub use mentorship_types::{
    ErrorCode, Principal, Role, SessionClaims, TokenDecoder, TokenError, UserProfile,
};
