//! Deploy configuration.
//!
//! Built once at process start by the adapter and passed by reference into
//! the orchestrators. There is no ambient global configuration.

use std::time::Duration;

use crate::services::DeployError;

/// Default deadline for an install or remove, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default delay between remove attempts, in seconds.
pub const DEFAULT_RETRY_INTERVAL_SECS: u64 = 1;

/// Default notification title.
pub const DEFAULT_NOTIFY_TITLE: &str = "Plugin Remote Install";

/// Connection settings for one Atlassian instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceConfig {
    /// Instance base URL (e.g., `https://jira.example.com`).
    pub url: String,
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: String,
}

impl InstanceConfig {
    /// Check that every connection field is set.
    ///
    /// Fields are checked in `url`, `username`, `password` order and the
    /// first empty one is reported.
    pub fn validate(&self) -> Result<(), DeployError> {
        for (name, value) in [
            ("url", &self.url),
            ("username", &self.username),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(DeployError::Configuration(format!("'{name}' is not set")));
            }
        }
        Ok(())
    }

    /// Base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Notification fan-out settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    /// Endpoint URLs. Empty disables notifications.
    pub endpoints: Vec<String>,
    /// Title attached to every notification.
    pub title: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            title: DEFAULT_NOTIFY_TITLE.to_string(),
        }
    }
}

/// Configuration for one install or remove invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub instance: InstanceConfig,
    /// Overall deadline for polling or retrying.
    pub timeout: Duration,
    /// Delay between remove attempts.
    pub retry_interval: Duration,
    pub notify: NotifyConfig,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            instance: InstanceConfig::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_interval: Duration::from_secs(DEFAULT_RETRY_INTERVAL_SECS),
            notify: NotifyConfig::default(),
        }
    }
}

impl DeployConfig {
    /// Create a config for `instance` with default timings.
    pub fn new(instance: InstanceConfig) -> Self {
        Self {
            instance,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    #[must_use]
    pub fn with_notify(mut self, notify: NotifyConfig) -> Self {
        self.notify = notify;
        self
    }

    /// Validate the configuration before any network call.
    pub fn validate(&self) -> Result<(), DeployError> {
        self.instance.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> InstanceConfig {
        InstanceConfig {
            url: "https://jira.example.com/".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_defaults() {
        let config = DeployConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.retry_interval, Duration::from_secs(1));
        assert_eq!(config.notify.title, "Plugin Remote Install");
        assert!(config.notify.endpoints.is_empty());
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut config = instance();
        config.url.clear();
        config.password.clear();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: 'url' is not set");

        let mut config = instance();
        config.username = "   ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'username' is not set"));
    }

    #[test]
    fn test_validate_complete() {
        assert!(DeployConfig::new(instance()).validate().is_ok());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        assert_eq!(instance().base_url(), "https://jira.example.com");
    }
}
