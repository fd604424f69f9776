//! Shared reachability check and final reporting for the orchestrators.

use tracing::{error, info, warn};

use crate::config::DeployConfig;
use crate::domain::{Notification, NotificationResult, NotifySeverity, PluginInfo, ServerVersion};
use crate::ports::{NotifierPort, UpmServerPort};

use super::error::DeployError;

/// Successful outcome of an install or remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    /// Final message, prefixed with the instance headline.
    pub message: String,
    /// Installed plugin, for installs.
    pub plugin: Option<PluginInfo>,
    /// Outcome of the notification fan-out.
    pub notification: NotificationResult,
}

/// Probe the instance and fail unless it answered.
pub(crate) async fn ensure_reachable(
    server: &dyn UpmServerPort,
    config: &DeployConfig,
) -> Result<ServerVersion, DeployError> {
    let version = server.detect_version().await?;
    if !version.is_reachable() {
        warn!(url = %config.instance.base_url(), ?version, "Instance did not answer");
        return Err(DeployError::Reachability(format!(
            "Instance '{}' is not reachable.",
            config.instance.base_url()
        )));
    }
    info!(version = %version.label(), "Instance is reachable");
    Ok(version)
}

/// Turns a terminal result into a message, a notification and a report.
pub(crate) struct Reporter<'a> {
    config: &'a DeployConfig,
    notifier: &'a dyn NotifierPort,
}

impl<'a> Reporter<'a> {
    pub(crate) fn new(config: &'a DeployConfig, notifier: &'a dyn NotifierPort) -> Self {
        Self { config, notifier }
    }

    /// Prefix `body` with the instance URL and version once the instance
    /// has answered.
    pub(crate) fn compose(&self, version: Option<&ServerVersion>, body: &str) -> String {
        match version {
            Some(version) => format!(
                "{} - Jira *v{}*\n{body}",
                self.config.instance.base_url(),
                version.label()
            ),
            None => body.to_string(),
        }
    }

    /// Log, notify exactly once, and return the final result.
    pub(crate) async fn conclude(
        &self,
        version: Option<&ServerVersion>,
        result: Result<(String, Option<PluginInfo>), DeployError>,
    ) -> Result<DeployReport, DeployError> {
        match result {
            Ok((body, plugin)) => {
                let message = self.compose(version, &body);
                info!("{message}");
                let notification = self.dispatch(&message, NotifySeverity::Success).await;
                Ok(DeployReport {
                    message,
                    plugin,
                    notification,
                })
            }
            Err(err) => {
                let message = self.compose(version, &err.to_string());
                error!(kind = ?err.kind(), "{message}");
                self.dispatch(&message, err.severity()).await;
                Err(err)
            }
        }
    }

    async fn dispatch(&self, body: &str, severity: NotifySeverity) -> NotificationResult {
        let endpoints = &self.config.notify.endpoints;
        if endpoints.is_empty() {
            return NotificationResult::NotAttempted;
        }

        let notification = Notification {
            title: self.config.notify.title.clone(),
            body: body.to_string(),
            severity,
        };
        let result = self.notifier.notify(endpoints, &notification).await;
        match result {
            NotificationResult::NotAttempted => info!("No notification was sent."),
            NotificationResult::AllSent => {
                info!("Notification sent to {} urls.", endpoints.len());
            }
            NotificationResult::SomeFailed => error!("Unable to send some notifications."),
        }
        result
    }
}
