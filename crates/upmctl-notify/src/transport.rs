//! Delivery of one payload to one endpoint.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::config::NotifierConfig;
use crate::error::{NotifyError, NotifyResult};
use crate::payload::WebhookPayload;

/// Posts a payload to a single URL.
#[async_trait]
pub trait NotifyTransport: Send + Sync {
    async fn post_json(&self, url: &Url, payload: &WebhookPayload) -> NotifyResult<()>;
}

/// Production transport using reqwest.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &NotifierConfig) -> NotifyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| NotifyError::Delivery {
                url: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NotifyTransport for ReqwestTransport {
    async fn post_json(&self, url: &Url, payload: &WebhookPayload) -> NotifyResult<()> {
        let response = self
            .client
            .post(url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "Notification response");
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
