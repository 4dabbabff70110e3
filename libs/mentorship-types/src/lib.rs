//! Shared session types and token primitives for the mentorship dashboard.
//!
//! This crate provides:
//! - The closed `Role` set and its landing paths
//! - `Principal`, the identity projected from a validated session
//! - Session token claims (`SessionClaims`) and backend user payloads
//! - Error codes and token decode/issue primitives

mod claims;
mod crypto;
mod errors;
mod principal;
mod responses;
mod role;

pub use claims::SessionClaims;
pub use crypto::{TokenDecoder, issue_token};
pub use errors::{ErrorCode, TokenError};
pub use principal::Principal;
pub use responses::UserProfile;
pub use role::Role;
