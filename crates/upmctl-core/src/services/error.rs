//! Deploy error taxonomy.

use thiserror::Error;

use crate::domain::NotifySeverity;
use crate::ports::UpmPortError;

/// Terminal state of a failed deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The command failed before or during the protocol.
    Failed,
    /// The deadline passed while polling or retrying.
    TimedOut,
}

/// Errors that abort an install or remove.
///
/// Every variant except `Configuration` is notified before it is
/// returned.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Required settings are missing. Raised before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The instance is unreachable or rejected the credentials.
    #[error("{0}")]
    Reachability(String),

    /// The server answered with a shape the protocol does not handle.
    #[error("{0}")]
    Protocol(String),

    /// The server reported a failure for the install task.
    #[error("{0}")]
    TaskFailed(String),

    /// The deadline passed.
    #[error("{0}")]
    Timeout(String),

    /// Any other server-side failure (rejected upload, HTTP error).
    #[error(transparent)]
    Server(UpmPortError),
}

impl DeployError {
    /// Severity used when notifying this failure.
    pub const fn severity(&self) -> NotifySeverity {
        match self {
            Self::Reachability(_) => NotifySeverity::Warning,
            _ => NotifySeverity::Failure,
        }
    }

    /// Terminal state this error represents.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout(_) => FailureKind::TimedOut,
            _ => FailureKind::Failed,
        }
    }
}

impl From<UpmPortError> for DeployError {
    fn from(err: UpmPortError) -> Self {
        match err {
            UpmPortError::AuthRejected { .. } | UpmPortError::AccessDenied { .. } => {
                Self::Reachability(err.to_string())
            }
            UpmPortError::Protocol { .. } => Self::Protocol(err.to_string()),
            other => Self::Server(other),
        }
    }
}
