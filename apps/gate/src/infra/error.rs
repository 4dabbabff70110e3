use thiserror::Error;

/// Infrastructure errors that can occur during startup.
///
/// Display messages are safe for logs. Debug output carries the full source
/// chain; log with `%e`, not `?e`.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("HTTP client initialization failed")]
    HttpClient(#[source] reqwest::Error),

    #[error("Cannot create log file {path}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TCP bind failed")]
    TcpBind(#[source] std::io::Error),

    #[error("Server error")]
    Server(#[source] std::io::Error),
}

impl From<reqwest::Error> for InfraError {
    fn from(e: reqwest::Error) -> Self {
        InfraError::HttpClient(e)
    }
}
