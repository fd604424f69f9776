//! CLI-specific error types and mappings.
//!
//! Maps `DeployError` to exit codes following sysexits.h where one fits.

use thiserror::Error;
use upmctl_core::{DeployError, FailureKind, UpmPortError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The instance could not be reached or refused the credentials.
    #[error("{0}")]
    Unreachable(String),

    /// The server spoke a protocol we do not understand.
    #[error("{0}")]
    Protocol(String),

    /// The install task or removal failed on the server.
    #[error("{0}")]
    Failed(String),

    /// The deadline passed.
    #[error("{0}")]
    Timeout(String),

    /// IO error (file not found, unreadable stdin, ...).
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to the process exit code.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Failed(_) => 1,
            Self::Unreachable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,          // EX_IOERR
            Self::Timeout(_) => 75,     // EX_TEMPFAIL
            Self::Protocol(_) => 76,    // EX_PROTOCOL
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<DeployError> for CliError {
    fn from(err: DeployError) -> Self {
        if err.kind() == FailureKind::TimedOut {
            return Self::Timeout(err.to_string());
        }
        match err {
            DeployError::Configuration(msg) => Self::Config(msg),
            DeployError::Reachability(msg) => Self::Unreachable(msg),
            DeployError::Protocol(msg) => Self::Protocol(msg),
            // Timeouts were routed by kind above
            DeployError::TaskFailed(msg) | DeployError::Timeout(msg) => Self::Failed(msg),
            DeployError::Server(UpmPortError::Io { message }) => Self::Io(message),
            DeployError::Server(other) => Self::Failed(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
