//! Notification endpoint parsing.

use std::fmt;

use url::Url;

use crate::error::{NotifyError, NotifyResult};

/// Request body shape expected by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// Apprise API server (`http`/`https`): `{title, body, type}`.
    AppriseApi,
    /// Apprise JSON notifier (`json`/`jsons`): versioned body with `message`.
    JsonNotifier,
}

/// A validated webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    url: Url,
    format: PayloadFormat,
}

impl Channel {
    /// Parse an endpoint string.
    ///
    /// `json://` and `jsons://` are rewritten to `http://` and `https://`.
    pub fn parse(endpoint: &str) -> NotifyResult<Self> {
        let endpoint = endpoint.trim();
        let (scheme, rest) = endpoint
            .split_once("://")
            .ok_or_else(|| NotifyError::InvalidUrl {
                url: endpoint.to_string(),
                reason: "missing scheme".to_string(),
            })?;

        let (transport_scheme, format) = match scheme.to_ascii_lowercase().as_str() {
            "http" => ("http", PayloadFormat::AppriseApi),
            "https" => ("https", PayloadFormat::AppriseApi),
            "json" => ("http", PayloadFormat::JsonNotifier),
            "jsons" => ("https", PayloadFormat::JsonNotifier),
            _ => {
                return Err(NotifyError::UnsupportedScheme {
                    scheme: scheme.to_string(),
                    url: endpoint.to_string(),
                });
            }
        };

        let url = Url::parse(&format!("{transport_scheme}://{rest}")).map_err(|e| {
            NotifyError::InvalidUrl {
                url: endpoint.to_string(),
                reason: e.to_string(),
            }
        })?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(NotifyError::InvalidUrl {
                url: endpoint.to_string(),
                reason: "missing host".to_string(),
            });
        }
        Ok(Self { url, format })
    }

    /// URL the payload is posted to.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    pub const fn format(&self) -> PayloadFormat {
        self.format
    }
}

/// Displays the endpoint with any password masked, for logs.
impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.url.password().is_some() {
            let mut masked = self.url.clone();
            // Only fails for URLs that cannot carry credentials
            let _ = masked.set_password(Some("***"));
            write!(f, "{masked}")
        } else {
            write!(f, "{}", self.url)
        }
    }
}

/// Split a list of endpoints separated by commas or whitespace.
pub fn split_endpoints(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
