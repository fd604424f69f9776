//! Wire types for plugin manager REST responses.
//!
//! Field names follow the server's camelCase JSON.

use serde::Deserialize;

/// Body of an accepted upload.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    /// Task id, sent as a string by current servers and as a number by
    /// some older ones.
    pub id: serde_json::Value,
}

/// Progress block of a pending task.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProgress {
    #[serde(default)]
    pub done: bool,
    pub name: Option<String>,
    pub error_message: Option<String>,
    pub amount_downloaded: Option<u64>,
    pub ping_after: Option<u64>,
}

/// Pending task payload, before the task resolves to a plugin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub status: TaskProgress,
    /// Older servers put the name beside the progress block.
    pub name: Option<String>,
    pub ping_after: Option<u64>,
}

/// Installed plugin payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginResponse {
    pub key: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub uses_licensing: bool,
}

/// Marketplace view of an installed plugin. Only the license is used.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceResponse {
    pub license_details: Option<LicenseResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseResponse {
    #[serde(default)]
    pub valid: bool,
    pub expiry_date_string: Option<String>,
}
