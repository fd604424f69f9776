//! Notification delivery errors.

use thiserror::Error;

/// Result type alias for notification operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Errors raised while delivering one notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The endpoint is not a URL.
    #[error("Invalid notification URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The endpoint uses a scheme that has no webhook mapping.
    #[error("Unsupported notification scheme '{scheme}' in '{url}'")]
    UnsupportedScheme { scheme: String, url: String },

    /// The request could not be sent.
    #[error("Failed to deliver notification to {url}: {message}")]
    Delivery { url: String, message: String },

    /// The endpoint answered with a non-success status.
    #[error("Notification endpoint {url} answered with status {status}")]
    Rejected { url: String, status: u16 },
}
