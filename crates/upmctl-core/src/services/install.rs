//! Plugin install orchestration.
//!
//! Drives the upload-then-poll protocol:
//!
//! ```text
//! Uploading -> Polling -> { Succeeded | Failed | TimedOut }
//! ```
//!
//! The deadline is checked at the top of every poll iteration. An in-flight
//! request is never interrupted.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{error, info, warn};

use crate::config::DeployConfig;
use crate::domain::{PluginInfo, ServerVersion, TaskStatus, UploadTask};
use crate::ports::{NotifierPort, UpmServerPort};

use super::error::DeployError;
use super::report::{DeployReport, Reporter, ensure_reachable};

/// Lower bound on the delay between two polls.
///
/// Keeps a `pingAfter` of zero from turning the loop into a busy spin.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Installs a plugin artifact on one instance.
pub struct InstallService<'a> {
    config: &'a DeployConfig,
    server: Arc<dyn UpmServerPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl<'a> InstallService<'a> {
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

    /// Install the artifact at `artifact`.
    ///
    /// Configuration is validated before any request is made. Every other
    /// terminal outcome is notified exactly once when endpoints are
    /// configured.
    pub async fn install(&self, artifact: &Path) -> Result<DeployReport, DeployError> {
        self.config.validate()?;
        info!(
            "Installing plugin to {} using '{}'. Timeout: {}s",
            self.config.instance.base_url(),
            artifact.display(),
            self.config.timeout.as_secs()
        );

        let mut version = None;
        let result = self.run(artifact, &mut version).await;
        Reporter::new(self.config, self.notifier.as_ref())
            .conclude(version.as_ref(), result)
            .await
    }

    async fn run(
        &self,
        artifact: &Path,
        version: &mut Option<ServerVersion>,
    ) -> Result<(String, Option<PluginInfo>), DeployError> {
        *version = Some(ensure_reachable(self.server.as_ref(), self.config).await?);

        let task = self.server.upload_plugin(artifact).await?;
        info!(task_id = %task.id, "Upload accepted, polling install task");

        let plugin = self.await_task(&task).await?;
        let message = self.describe(&plugin).await;
        Ok((message, Some(plugin)))
    }

    async fn await_task(&self, task: &UploadTask) -> Result<PluginInfo, DeployError> {
        let deadline = Instant::now() + self.config.timeout;

        loop {
            if Instant::now() >= deadline {
                return Err(DeployError::Timeout(format!(
                    "Timeout after {} seconds",
                    self.config.timeout.as_secs()
                )));
            }

            match self.server.pending_task(&task.id).await? {
                TaskStatus::Pending {
                    name,
                    amount_downloaded,
                    ping_after,
                } => {
                    let wait = ping_after.max(MIN_POLL_INTERVAL);
                    info!(
                        task = %name,
                        amount_downloaded = amount_downloaded.unwrap_or(0),
                        "Task {} is still pending. Pinging after: {:.1} sec",
                        task.id,
                        wait.as_secs_f64()
                    );
                    sleep(wait).await;
                }
                TaskStatus::Failed {
                    name,
                    error_message,
                } => {
                    return Err(DeployError::TaskFailed(format!(
                        "Error installing plugin {name}: {error_message}"
                    )));
                }
                TaskStatus::DoneWithoutResult { name } => {
                    let message = format!(
                        "Task {} ({name}) is done but reported neither an error nor a plugin",
                        task.id
                    );
                    error!("{message}");
                    return Err(DeployError::TaskFailed(message));
                }
                TaskStatus::Redirected(plugin) => return Ok(plugin),
            }
        }
    }

    /// Final success message, with license details for licensed plugins.
    async fn describe(&self, plugin: &PluginInfo) -> String {
        let mut message = plugin.to_string();
        if plugin.uses_licensing {
            let summary = match self.server.marketplace_info(&plugin.key).await {
                Ok(marketplace) => marketplace.license_summary(),
                Err(err) => {
                    warn!(plugin = %plugin.key, error = %err, "Could not fetch license details");
                    format!("License details unavailable: {err}")
                }
            };
            message.push('\n');
            message.push_str(&summary);
        }
        message
    }
}
