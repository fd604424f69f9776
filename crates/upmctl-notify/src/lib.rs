#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod channel;
mod config;
mod error;
mod notifier;
mod payload;
mod transport;

pub use channel::{Channel, PayloadFormat, split_endpoints};
pub use config::NotifierConfig;
pub use error::{NotifyError, NotifyResult};
pub use notifier::{DefaultWebhookNotifier, WebhookNotifier};
pub use payload::WebhookPayload;
pub use transport::{NotifyTransport, ReqwestTransport};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio as _;
