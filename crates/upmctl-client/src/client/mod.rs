//! Plugin manager client for one Atlassian instance.
//!
//! Operations are split by concern: `version` probes the instance,
//! `plugins` drives the upload, task and removal endpoints.

mod plugins;
mod version;

use tokio::sync::OnceCell;
use upmctl_core::ServerVersion;

use crate::config::UpmClientConfig;
use crate::error::UpmResult;
use crate::http::{HttpBackend, ReqwestBackend};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default client using the reqwest HTTP backend.
pub type DefaultAtlassianServer = AtlassianServer<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the Universal Plugin Manager REST API.
///
/// Generic over the HTTP backend so tests can run against
/// `http::testing::FakeBackend`. The detected version is cached for the
/// lifetime of the client.
pub struct AtlassianServer<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: String,
    pub(crate) version: OnceCell<ServerVersion>,
}

impl DefaultAtlassianServer {
    /// Create a new client with the given configuration.
    pub fn new(config: &UpmClientConfig) -> UpmResult<Self> {
        let backend = ReqwestBackend::new(config)?;
        Ok(Self::with_backend(config.base_url(), backend))
    }
}

impl<B: HttpBackend> AtlassianServer<B> {
    /// Create a client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    pub fn with_backend(base_url: &str, backend: B) -> Self {
        Self {
            backend,
            base_url: base_url.trim_end_matches('/').to_string(),
            version: OnceCell::new(),
        }
    }

    /// Instance base URL without the trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
