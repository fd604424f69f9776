//! Response parsing for the plugin manager protocol.
//!
//! Wire payloads are converted into domain types here so the client methods
//! only deal with transport.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde_json::Value;
use upmctl_core::{LicenseDetails, MarketplaceInfo, PluginInfo, TaskStatus, UploadTask};

use crate::error::{UpmError, UpmResult};
use crate::models::{MarketplaceResponse, PluginResponse, TaskResponse, UploadResponse};

/// Poll interval used when the server does not suggest one.
pub const DEFAULT_PING_AFTER_MS: u64 = 1000;

static VERSION_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta\s+name="ajs-version-number"\s+content="([^"]*)""#)
        .expect("version pattern is a valid regex")
});

// ============================================================================
// Version
// ============================================================================

/// Extract the product version from the login page markup.
pub fn parse_version(html: &str) -> Option<String> {
    VERSION_META
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|version| !version.is_empty())
}

// ============================================================================
// Upload
// ============================================================================

/// Remove the `<textarea>` wrapper the upload endpoint puts around its JSON.
pub fn strip_textarea(body: &str) -> String {
    body.replace("<textarea>", "").replace("</textarea>", "")
}

/// Decode the upload acknowledgement into the task handle.
pub fn parse_upload(body: &str) -> UpmResult<UploadTask> {
    let json = strip_textarea(body);
    let upload: UploadResponse = serde_json::from_str(&json).map_err(|e| {
        UpmError::invalid_response(format!("Upload response is not valid JSON: {e}"), &json)
    })?;

    let id = match upload.id {
        Value::String(id) if !id.is_empty() => id,
        Value::Number(id) => id.to_string(),
        _ => {
            return Err(UpmError::invalid_response(
                "Upload response has no task id",
                json,
            ));
        }
    };
    Ok(UploadTask { id })
}

// ============================================================================
// Pending task
// ============================================================================

/// Classify a pending-task payload.
///
/// A payload with `status` is still a task; one with `key` is the installed
/// plugin the task resolved to. Anything else is a protocol error.
pub fn parse_task(task_id: &str, body: &str) -> UpmResult<TaskStatus> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        UpmError::invalid_response(format!("Task {task_id} response is not valid JSON: {e}"), body)
    })?;

    let unexpected = || {
        UpmError::invalid_response(format!("Task {task_id} has unexpected response"), body)
    };

    if value.get("status").is_some() {
        let task: TaskResponse = serde_json::from_value(value).map_err(|_| unexpected())?;
        return Ok(task_status(task_id, task));
    }

    if value.get("key").is_some() {
        let plugin: PluginResponse = serde_json::from_value(value).map_err(|_| unexpected())?;
        return Ok(TaskStatus::Redirected(PluginInfo {
            key: plugin.key,
            enabled: plugin.enabled,
            version: plugin.version,
            uses_licensing: plugin.uses_licensing,
        }));
    }

    Err(unexpected())
}

fn task_status(task_id: &str, task: TaskResponse) -> TaskStatus {
    let progress = task.status;
    let name = progress
        .name
        .or(task.name)
        .unwrap_or_else(|| task_id.to_string());

    if let Some(error_message) = progress.error_message.filter(|m| !m.is_empty()) {
        return TaskStatus::Failed {
            name,
            error_message,
        };
    }
    if progress.done {
        return TaskStatus::DoneWithoutResult { name };
    }

    let ping_after = progress
        .ping_after
        .or(task.ping_after)
        .unwrap_or(DEFAULT_PING_AFTER_MS);
    TaskStatus::Pending {
        name,
        amount_downloaded: progress.amount_downloaded,
        ping_after: Duration::from_millis(ping_after),
    }
}

// ============================================================================
// Marketplace
// ============================================================================

/// Decode the marketplace view of a plugin.
pub fn parse_marketplace(body: &str) -> UpmResult<MarketplaceInfo> {
    let response: MarketplaceResponse = serde_json::from_str(body).map_err(|e| {
        UpmError::invalid_response(format!("Marketplace response is not valid JSON: {e}"), body)
    })?;
    Ok(MarketplaceInfo {
        license: response.license_details.map(|license| LicenseDetails {
            valid: license.valid,
            expiry_date: license.expiry_date_string,
        }),
    })
}
