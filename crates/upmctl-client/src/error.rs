//! Internal error types for plugin manager operations.
//!
//! These errors are mapped to core port errors at the boundary (see `port.rs`).

use thiserror::Error;

/// Result type alias for plugin manager operations.
pub type UpmResult<T> = Result<T, UpmError>;

/// Errors raised while talking to the plugin manager REST API.
#[derive(Debug, Error)]
pub enum UpmError {
    /// The server answered with a 4xx or 5xx status.
    #[error("Request to {url} failed with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// The connection could not be established.
    #[error("Could not connect to {url}: {message}")]
    Connection {
        /// The URL that was requested
        url: String,
        /// Underlying client error
        message: String,
    },

    /// The request failed after connecting (timeout, broken body, ...).
    #[error("Request to {url} failed: {message}")]
    Transport {
        /// The URL that was requested
        url: String,
        /// Underlying client error
        message: String,
    },

    /// The server answered with a success status other than the one the
    /// protocol requires.
    #[error("Expected status {expected} from {url}, got {actual}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        url: String,
    },

    /// A required response header was absent.
    #[error("Response from {url} is missing the '{name}' header")]
    MissingHeader {
        /// Header name
        name: &'static str,
        /// The URL that was requested
        url: String,
    },

    /// The response body did not have the expected shape.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
        /// Raw payload as received
        payload: String,
    },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Reading the local artifact failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl UpmError {
    /// Shorthand for an invalid payload error.
    pub(crate) fn invalid_response(message: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            payload: payload.into(),
        }
    }
}
