//! Test utilities for HTTP-level testing.
//!
//! This module provides:
//! - Test data factories for tokens, profiles and config
//! - An in-memory backend standing in for the REST API
//! - `TestAppStateBuilder` for constructing an `AppState` around it

mod app_state_builder;
mod backend_mocks;
mod factories;

pub use app_state_builder::*;
pub use backend_mocks::*;
pub use factories::*;
