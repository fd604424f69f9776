#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{
    DEFAULT_NOTIFY_TITLE, DEFAULT_RETRY_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS, DeployConfig,
    InstanceConfig, NotifyConfig,
};
pub use domain::{
    LicenseDetails, MarketplaceInfo, Notification, NotificationResult, NotifySeverity, PluginInfo,
    ServerVersion, TaskStatus, UploadTask,
};
pub use ports::{NoopNotifier, NotifierPort, UpmPortError, UpmPortResult, UpmServerPort};
pub use services::{DeployError, DeployReport, FailureKind, InstallService, RemoveService};

// Silence unused dev-dependency warnings; these are exercised by the
// integration tests under tests/
#[cfg(test)]
use mockall as _;
