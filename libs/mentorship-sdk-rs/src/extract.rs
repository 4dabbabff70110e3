//! Bearer token extraction. The cookie is read through the host framework's
//! cookie jar.

/// Trait for accessing HTTP headers in a framework-agnostic way.
///
/// # Example
///
/// ```rust,ignore
/// impl Headers for axum::http::HeaderMap {
///     fn get_authorization(&self) -> Option<&str> {
///         self.get("authorization").and_then(|v| v.to_str().ok())
///     }
/// }
/// ```
pub trait Headers {
    /// Get the Authorization header value.
    fn get_authorization(&self) -> Option<&str>;
}

/// Extract token from Authorization Bearer header.
pub fn extract_from_header(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
