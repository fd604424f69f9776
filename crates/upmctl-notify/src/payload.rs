//! Webhook request bodies.

use serde::Serialize;
use upmctl_core::Notification;

use crate::channel::PayloadFormat;

/// Version field of the JSON notifier body.
const JSON_NOTIFIER_VERSION: &str = "1.0";

/// Body posted to one endpoint, shaped by the endpoint's format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WebhookPayload {
    AppriseApi {
        title: String,
        body: String,
        /// One of `info`, `success`, `warning`, `failure`
        #[serde(rename = "type")]
        kind: String,
    },
    JsonNotifier {
        version: &'static str,
        title: String,
        message: String,
        /// Always empty, no files are attached.
        attachments: Vec<String>,
        #[serde(rename = "type")]
        kind: String,
    },
}

impl WebhookPayload {
    pub fn new(format: PayloadFormat, notification: &Notification) -> Self {
        let title = notification.title.clone();
        let kind = notification.severity.as_str().to_string();
        match format {
            PayloadFormat::AppriseApi => Self::AppriseApi {
                title,
                body: notification.body.clone(),
                kind,
            },
            PayloadFormat::JsonNotifier => Self::JsonNotifier {
                version: JSON_NOTIFIER_VERSION,
                title,
                message: notification.body.clone(),
                attachments: Vec::new(),
                kind,
            },
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::AppriseApi { title, .. } | Self::JsonNotifier { title, .. } => title,
        }
    }

    /// Severity string sent in the `type` field.
    pub fn kind(&self) -> &str {
        match self {
            Self::AppriseApi { kind, .. } | Self::JsonNotifier { kind, .. } => kind,
        }
    }
}
