//! Error types for coauthor-pr

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a run
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration (env vars, flags)
    #[error("configuration error: {0}")]
    Config(String),

    /// The forge API returned a non-success status
    #[error("github api error: {method} {path} returned {status}: {body}")]
    Api {
        /// HTTP method of the failing request
        method: &'static str,
        /// Request path relative to the API base
        path: String,
        /// HTTP status code
        status: u16,
        /// Response body (truncated by the caller if large)
        body: String,
    },

    /// HTTP transport failure (connection, TLS, timeout)
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response was missing a field or could not be decoded
    #[error("unexpected response: {0}")]
    Response(String),
}

impl Error {
    /// Build an API error from a failing response
    pub fn api(method: &'static str, path: impl Into<String>, status: u16, body: String) -> Self {
        Self::Api {
            method,
            path: path.into(),
            status,
            body,
        }
    }

    /// HTTP status of an API error, if this is one
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
