pub mod app_error_impl;
pub mod app_state;
pub mod cookie_store;
pub mod middleware;
pub mod routes;
pub mod views;
