//! Plugin and install-task domain types.
//!
//! These types describe what the plugin manager reports back, independent
//! of the wire format the server uses to transport it.

use std::fmt;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Server Version
// ─────────────────────────────────────────────────────────────────────────────

/// Result of probing the instance for its product version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerVersion {
    /// The instance answered and advertised this version.
    Detected(String),
    /// The instance answered but the version marker was not found.
    Unknown,
    /// The instance could not be reached.
    Unreachable(String),
}

impl ServerVersion {
    /// Whether the instance answered at all.
    pub const fn is_reachable(&self) -> bool {
        !matches!(self, Self::Unreachable(_))
    }

    /// Version label used in report headers.
    pub fn label(&self) -> &str {
        match self {
            Self::Detected(version) => version,
            Self::Unknown | Self::Unreachable(_) => "unknown",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Upload / Task Types
// ─────────────────────────────────────────────────────────────────────────────

/// Handle on the asynchronous install task created by an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    /// Opaque task id assigned by the server.
    pub id: String,
}

/// Final plugin information, reached once the install task redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    /// Plugin key (e.g., `com.example.my-plugin`).
    pub key: String,
    /// Whether the plugin is enabled after install.
    pub enabled: bool,
    /// Installed plugin version.
    pub version: String,
    /// Whether the plugin participates in Marketplace licensing.
    pub uses_licensing: bool,
}

impl fmt::Display for PluginInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Plugin '{}' is installed. Enabled: {}. Version: {}.",
            self.key, self.enabled, self.version
        )
    }
}

/// Status of a pending install task as seen by one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Still running; poll again after `ping_after`.
    Pending {
        /// Human-readable task name.
        name: String,
        /// Bytes downloaded so far, when reported.
        amount_downloaded: Option<u64>,
        /// Server-requested delay before the next poll.
        ping_after: Duration,
    },
    /// The server reported an error for the task.
    Failed {
        /// Human-readable task name.
        name: String,
        /// Error message reported by the server.
        error_message: String,
    },
    /// The server says the task is done but neither redirected nor
    /// reported an error.
    DoneWithoutResult {
        /// Human-readable task name.
        name: String,
    },
    /// The task resolved and the server redirected to the plugin.
    Redirected(PluginInfo),
}

// ─────────────────────────────────────────────────────────────────────────────
// Licensing
// ─────────────────────────────────────────────────────────────────────────────

/// License details for an installed plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseDetails {
    /// Whether the installed license is valid.
    pub valid: bool,
    /// Expiry date as formatted by the server.
    pub expiry_date: Option<String>,
}

/// Marketplace metadata for an installed plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketplaceInfo {
    /// License details, absent when no license is installed.
    pub license: Option<LicenseDetails>,
}

impl MarketplaceInfo {
    /// One-line license summary appended to install reports.
    pub fn license_summary(&self) -> String {
        match &self.license {
            Some(license) => format!(
                "License valid: {}. Expires: {}.",
                license.valid,
                license.expiry_date.as_deref().unwrap_or("never")
            ),
            None => "Plugin is not licensed.".to_string(),
        }
    }
}
