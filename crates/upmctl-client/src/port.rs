//! Port trait implementation for `AtlassianServer`.
//!
//! Implements the core-owned `UpmServerPort` and maps internal `UpmError`
//! values to `UpmPortError` at the boundary.

use std::path::Path;

use async_trait::async_trait;
use upmctl_core::{
    MarketplaceInfo, ServerVersion, TaskStatus, UploadTask, UpmPortError, UpmPortResult,
    UpmServerPort,
};

use crate::client::AtlassianServer;
use crate::error::UpmError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `UpmError` to core `UpmPortError`.
fn map_error(err: UpmError) -> UpmPortError {
    match err {
        UpmError::Status { status, url, body } => match status {
            401 => UpmPortError::AuthRejected { url },
            403 => UpmPortError::AccessDenied { url },
            _ => UpmPortError::Http { status, url, body },
        },
        UpmError::Connection { .. } | UpmError::Transport { .. } => UpmPortError::Transport {
            message: err.to_string(),
        },
        UpmError::UnexpectedStatus {
            expected,
            actual,
            url,
        } => UpmPortError::UnexpectedStatus {
            expected,
            actual,
            url,
        },
        UpmError::MissingHeader { .. } | UpmError::InvalidUrl(_) => UpmPortError::Protocol {
            message: err.to_string(),
            payload: String::new(),
        },
        UpmError::InvalidResponse { message, payload } => {
            UpmPortError::Protocol { message, payload }
        }
        UpmError::Io { .. } => UpmPortError::Io {
            message: err.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend> UpmServerPort for AtlassianServer<B> {
    async fn detect_version(&self) -> UpmPortResult<ServerVersion> {
        Self::detect_version(self).await.map_err(map_error)
    }

    async fn upload_plugin(&self, artifact: &Path) -> UpmPortResult<UploadTask> {
        Self::upload_plugin(self, artifact).await.map_err(map_error)
    }

    async fn pending_task(&self, task_id: &str) -> UpmPortResult<TaskStatus> {
        Self::pending_task(self, task_id).await.map_err(map_error)
    }

    async fn marketplace_info(&self, plugin_key: &str) -> UpmPortResult<MarketplaceInfo> {
        Self::marketplace_info(self, plugin_key)
            .await
            .map_err(map_error)
    }

    async fn remove_plugin(&self, plugin_key: &str) -> UpmPortResult<bool> {
        Self::remove_plugin(self, plugin_key).await.map_err(map_error)
    }
}
