//! `NotifierPort` implementation that fans out to webhooks.

use async_trait::async_trait;
use tracing::{debug, warn};
use upmctl_core::{Notification, NotificationResult, NotifierPort};

use crate::channel::Channel;
use crate::config::NotifierConfig;
use crate::error::NotifyResult;
use crate::payload::WebhookPayload;
use crate::transport::{NotifyTransport, ReqwestTransport};

/// Default notifier using the reqwest transport.
pub type DefaultWebhookNotifier = WebhookNotifier<ReqwestTransport>;

/// Sends each notification to every endpoint, one request per endpoint.
///
/// Endpoints are independent: an invalid or failing one is logged and the
/// rest are still attempted.
pub struct WebhookNotifier<T: NotifyTransport> {
    transport: T,
}

impl DefaultWebhookNotifier {
    pub fn new(config: &NotifierConfig) -> NotifyResult<Self> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?))
    }
}

impl<T: NotifyTransport> WebhookNotifier<T> {
    /// Create a notifier with a custom transport.
    pub const fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    async fn deliver(&self, endpoint: &str, notification: &Notification) -> NotifyResult<()> {
        let channel = Channel::parse(endpoint)?;
        debug!(endpoint = %channel, format = ?channel.format(), "Sending notification");
        let payload = WebhookPayload::new(channel.format(), notification);
        self.transport.post_json(channel.url(), &payload).await
    }
}

#[async_trait]
impl<T: NotifyTransport> NotifierPort for WebhookNotifier<T> {
    async fn notify(&self, endpoints: &[String], notification: &Notification) -> NotificationResult {
        if endpoints.is_empty() {
            return NotificationResult::NotAttempted;
        }

        let mut failed = 0usize;
        for endpoint in endpoints {
            if let Err(err) = self.deliver(endpoint, notification).await {
                warn!("Notification failed: {err}");
                failed += 1;
            }
        }

        if failed == 0 {
            NotificationResult::AllSent
        } else {
            NotificationResult::SomeFailed
        }
    }
}
