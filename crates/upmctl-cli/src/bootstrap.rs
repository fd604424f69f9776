//! CLI bootstrap - the composition root.
//!
//! This is the only place where concrete adapters are built:
//! - `DefaultAtlassianServer` (via upmctl-client) for the plugin manager
//! - `DefaultWebhookNotifier` (via upmctl-notify) for notifications
//!
//! Command handlers receive the composed `CliContext` and delegate to the
//! core services.

use std::sync::Arc;

use upmctl_client::{DefaultAtlassianServer, UpmClientConfig};
use upmctl_core::{DeployConfig, InstallService, NotifierPort, RemoveService, UpmServerPort};
use upmctl_notify::{DefaultWebhookNotifier, NotifierConfig};

use crate::error::CliError;

/// Fully composed context for one command.
pub struct CliContext {
    /// Resolved deploy configuration.
    pub config: DeployConfig,
    /// Plugin manager of the target instance.
    pub server: Arc<dyn UpmServerPort>,
    /// Notification fan-out.
    pub notifier: Arc<dyn NotifierPort>,
}

impl CliContext {
    /// Assemble a context from already-built adapters.
    pub fn new(
        config: DeployConfig,
        server: Arc<dyn UpmServerPort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        Self {
            config,
            server,
            notifier,
        }
    }

    pub fn install_service(&self) -> InstallService<'_> {
        InstallService::new(&self.config, self.server.clone(), self.notifier.clone())
    }

    pub fn remove_service(&self) -> RemoveService<'_> {
        RemoveService::new(&self.config, self.server.clone(), self.notifier.clone())
    }
}

/// Bootstrap the production adapters.
///
/// Validates the configuration first so a missing setting fails before any
/// client is built.
pub fn bootstrap(config: DeployConfig) -> Result<CliContext, CliError> {
    config.validate()?;

    let client_config = UpmClientConfig::new(
        config.instance.base_url(),
        config.instance.username.as_str(),
        config.instance.password.as_str(),
    );
    let server = DefaultAtlassianServer::new(&client_config)
        .map_err(|e| CliError::Config(format!("Cannot create HTTP client: {e}")))?;
    let notifier = DefaultWebhookNotifier::new(&NotifierConfig::new())
        .map_err(|e| CliError::Config(format!("Cannot create notifier: {e}")))?;

    Ok(CliContext::new(config, Arc::new(server), Arc::new(notifier)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use upmctl_core::InstanceConfig;

    #[test]
    fn test_bootstrap_rejects_missing_settings() {
        let config = DeployConfig::new(InstanceConfig {
            url: "https://jira.example.com".to_string(),
            username: "admin".to_string(),
            password: String::new(),
        });
        let Err(err) = bootstrap(config) else {
            panic!("expected configuration error");
        };
        assert_eq!(err.to_string(), "Configuration error: 'password' is not set");
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_bootstrap_builds_adapters() {
        let config = DeployConfig::new(InstanceConfig {
            url: "https://jira.example.com/".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
        });
        let ctx = bootstrap(config).unwrap();
        assert_eq!(ctx.config.instance.base_url(), "https://jira.example.com");
    }
}
