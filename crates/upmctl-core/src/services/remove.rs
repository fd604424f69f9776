//! Plugin removal orchestration.
//!
//! Issues the delete until the server confirms it or the deadline passes.
//! Attempts are spaced by `DeployConfig::retry_interval`, never less than
//! `MIN_POLL_INTERVAL`.

use std::sync::Arc;

use tokio::time::{Instant, sleep};
use tracing::{info, warn};

use crate::config::DeployConfig;
use crate::domain::{PluginInfo, ServerVersion};
use crate::ports::{NotifierPort, UpmServerPort};

use super::error::DeployError;
use super::install::MIN_POLL_INTERVAL;
use super::report::{DeployReport, Reporter, ensure_reachable};

/// Removes a plugin from one instance.
pub struct RemoveService<'a> {
    config: &'a DeployConfig,
    server: Arc<dyn UpmServerPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl<'a> RemoveService<'a> {
    pub fn new(
        config: &'a DeployConfig,
        server: Arc<dyn UpmServerPort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        Self {
            config,
            server,
            notifier,
        }
    }

    /// Remove the plugin identified by `plugin_key`.
    pub async fn remove(&self, plugin_key: &str) -> Result<DeployReport, DeployError> {
        self.config.validate()?;
        info!(
            "Removing plugin '{plugin_key}' from {}. Timeout: {}s",
            self.config.instance.base_url(),
            self.config.timeout.as_secs()
        );

        let mut version = None;
        let result = self.run(plugin_key, &mut version).await;
        Reporter::new(self.config, self.notifier.as_ref())
            .conclude(version.as_ref(), result)
            .await
    }

    async fn run(
        &self,
        plugin_key: &str,
        version: &mut Option<ServerVersion>,
    ) -> Result<(String, Option<PluginInfo>), DeployError> {
        *version = Some(ensure_reachable(self.server.as_ref(), self.config).await?);

        let deadline = Instant::now() + self.config.timeout;
        let mut attempts: u32 = 0;

        while Instant::now() < deadline {
            attempts += 1;
            match self.server.remove_plugin(plugin_key).await {
                Ok(true) => {
                    return Ok(("Removing plugin is successful".to_string(), None));
                }
                Ok(false) => {
                    warn!("Removing plugin failed. Retry {attempts}.");
                }
                Err(err) => {
                    warn!(error = %err, "Removing plugin failed. Retry {attempts}.");
                }
            }
            sleep(self.config.retry_interval.max(MIN_POLL_INTERVAL)).await;
        }

        Err(DeployError::Timeout(format!(
            "Removing plugin failed after {attempts} attempts. Timed out after {} seconds",
            self.config.timeout.as_secs()
        )))
    }
}
