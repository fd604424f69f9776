//! Plugin manager server port.
//!
//! The orchestrators talk to the Atlassian instance only through this
//! trait. The HTTP implementation lives in `upmctl-client`.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{MarketplaceInfo, ServerVersion, TaskStatus, UploadTask};

/// Errors from plugin manager port operations.
///
/// Transport and decoding errors are mapped to these at the adapter
/// boundary.
#[derive(Debug, Error)]
pub enum UpmPortError {
    /// The connection failed or broke during a protocol request.
    ///
    /// Reachability is decided by `detect_version`, so this is a failure of
    /// the operation in progress.
    #[error("Request failed: {message}")]
    Transport {
        /// Description of the connection failure
        message: String,
    },

    /// The instance rejected the credentials (HTTP 401).
    #[error("Authentication rejected by {url}")]
    AuthRejected {
        /// URL that rejected the request
        url: String,
    },

    /// The account lacks permission (HTTP 403).
    #[error("Access denied by {url}")]
    AccessDenied {
        /// URL that denied the request
        url: String,
    },

    /// The server answered with an error status.
    #[error("Request to {url} failed with status {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Response body, for diagnosis
        body: String,
    },

    /// The server answered with a success status other than the one the
    /// protocol requires.
    #[error("Expected status {expected} from {url}, got {actual}")]
    UnexpectedStatus {
        /// Status the protocol requires
        expected: u16,
        /// Status actually returned
        actual: u16,
        /// The URL that was requested
        url: String,
    },

    /// The response shape is not one the protocol understands.
    #[error("Protocol error: {message} (payload: {payload})")]
    Protocol {
        /// What was wrong
        message: String,
        /// Raw payload for diagnosis
        payload: String,
    },

    /// Local I/O failure (e.g., reading the artifact).
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O failure
        message: String,
    },
}

/// Result type alias for plugin manager port operations.
pub type UpmPortResult<T> = Result<T, UpmPortError>;

/// Port trait for Universal Plugin Manager operations.
///
/// # Design
///
/// - Uses core-owned domain types, not wire types
/// - Returns `UpmPortError` for all failures
/// - One implementation instance is one server session
#[async_trait]
pub trait UpmServerPort: Send + Sync {
    /// Probe the instance and report its version.
    ///
    /// Connection failures are reported as `ServerVersion::Unreachable`
    /// rather than an error. Credential rejection is an error.
    async fn detect_version(&self) -> UpmPortResult<ServerVersion>;

    /// Upload a plugin artifact and return the resulting install task.
    async fn upload_plugin(&self, artifact: &Path) -> UpmPortResult<UploadTask>;

    /// Poll an install task once.
    async fn pending_task(&self, task_id: &str) -> UpmPortResult<TaskStatus>;

    /// Fetch Marketplace licensing metadata for an installed plugin.
    async fn marketplace_info(&self, plugin_key: &str) -> UpmPortResult<MarketplaceInfo>;

    /// Request removal of a plugin. `Ok(true)` only when the server
    /// confirms the deletion.
    async fn remove_plugin(&self, plugin_key: &str) -> UpmPortResult<bool>;
}
