//! Notification domain types.

use std::fmt;

/// Severity attached to a notification.
///
/// The names match the notification types understood by Apprise-style
/// endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifySeverity {
    Info,
    Success,
    Warning,
    Failure,
}

impl NotifySeverity {
    /// Wire name of the severity.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for NotifySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message to fan out to notification endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub severity: NotifySeverity,
}

/// Aggregate outcome of a notification fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationResult {
    /// No endpoint was configured.
    #[default]
    NotAttempted,
    /// Every endpoint accepted the notification.
    AllSent,
    /// At least one endpoint failed.
    SomeFailed,
}
