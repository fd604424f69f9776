//! Notifier configuration.

use std::time::Duration;

/// Configuration for webhook delivery.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Per-endpoint request timeout
    pub(crate) timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: concat!("upmctl/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl NotifierConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-endpoint timeout. Defaults to 10 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
