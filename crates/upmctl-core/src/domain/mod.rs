//! Domain types for plugin deployment.
//!
//! Pure data with no infrastructure dependencies.

mod notification;
mod plugin;

pub use notification::{Notification, NotificationResult, NotifySeverity};
pub use plugin::{
    LicenseDetails, MarketplaceInfo, PluginInfo, ServerVersion, TaskStatus, UploadTask,
};
