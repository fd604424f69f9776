//! HTTP backend abstraction for the plugin manager API.
//!
//! The client builds `HttpRequest` values and hands them to an
//! `HttpBackend`. The production backend uses reqwest with basic auth on
//! every call; tests swap in `testing::FakeBackend`.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::UpmClientConfig;
use crate::error::{UpmError, UpmResult};
use crate::headers::HeaderSet;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// ============================================================================
// Requests and responses
// ============================================================================

/// HTTP verbs used by the plugin manager protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Where a request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Path relative to the instance base URL.
    Path(String),
    /// Absolute URL, used for server-provided locations.
    Url(String),
}

impl Target {
    /// Resolve against a base URL (without trailing slash).
    pub fn resolve(&self, base_url: &str) -> String {
        match self {
            Self::Path(path) => format!("{base_url}{path}"),
            Self::Url(url) => url.clone(),
        }
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Empty,
    /// Serialized as JSON with a JSON content type.
    Json(serde_json::Value),
    /// A single-file multipart form.
    Multipart {
        field: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

/// A request to the plugin manager.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub target: Target,
    pub headers: HeaderSet,
    pub body: Body,
    /// Whether 3xx responses are followed by the backend.
    pub follow_redirects: bool,
    /// Overrides the client-wide timeout for this call.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    fn new(method: Method, target: Target) -> Self {
        Self {
            method,
            target,
            headers: &[],
            body: Body::Empty,
            follow_redirects: true,
            timeout: None,
        }
    }

    pub fn get(target: Target) -> Self {
        Self::new(Method::Get, target)
    }

    pub fn post(target: Target) -> Self {
        Self::new(Method::Post, target)
    }

    pub fn delete(target: Target) -> Self {
        Self::new(Method::Delete, target)
    }

    #[must_use]
    pub const fn with_headers(mut self, headers: HeaderSet) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_json(mut self, value: serde_json::Value) -> Self {
        self.body = Body::Json(value);
        self
    }

    #[must_use]
    pub fn with_multipart(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.body = Body::Multipart {
            field: field.into(),
            file_name: file_name.into(),
            bytes,
        };
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Return 3xx responses to the caller instead of following them.
    #[must_use]
    pub const fn without_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }
}

/// A response with the body already read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Final URL of the request
    pub url: String,
    /// Header names are lowercase
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub const fn is_redirect(&self) -> bool {
        self.status >= 300 && self.status < 400
    }
}

/// Turn 4xx/5xx responses into errors. Anything below 400 passes through.
pub(crate) fn ensure_success(response: HttpResponse) -> UpmResult<HttpResponse> {
    if response.status >= 400 {
        return Err(UpmError::Status {
            status: response.status,
            url: response.url,
            body: response.body,
        });
    }
    Ok(response)
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Executes plugin manager requests.
///
/// Implementations resolve `Target::Path` against the instance base URL,
/// authenticate every request and fail with `UpmError::Status` on 4xx/5xx.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> UpmResult<HttpResponse>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// Holds two clients so redirect handling can be chosen per request.
pub struct ReqwestBackend {
    base_url: String,
    username: String,
    password: String,
    client: reqwest::Client,
    no_redirect_client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &UpmClientConfig) -> UpmResult<Self> {
        let client = Self::builder(config)
            .build()
            .map_err(|e| transport(&config.base_url, &e))?;
        let no_redirect_client = Self::builder(config)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| transport(&config.base_url, &e))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            client,
            no_redirect_client,
        })
    }

    fn builder(config: &UpmClientConfig) -> reqwest::ClientBuilder {
        reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(Duration::from_secs(10)))
            .user_agent(config.user_agent.clone())
    }

    fn build_request(&self, request: HttpRequest, url: &str) -> reqwest::RequestBuilder {
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.no_redirect_client
        };
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = client
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password));
        for (name, value) in request.headers {
            builder = builder.header(*name, *value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart {
                field,
                file_name,
                bytes,
            } => {
                let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
                builder.multipart(reqwest::multipart::Form::new().part(field, part))
            }
        }
    }
}

fn transport(url: &str, error: &reqwest::Error) -> UpmError {
    if error.is_connect() {
        UpmError::Connection {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        UpmError::Transport {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: HttpRequest) -> UpmResult<HttpResponse> {
        let url = request.target.resolve(&self.base_url);
        let method = request.method;
        let response = self
            .build_request(request, &url)
            .send()
            .await
            .map_err(|e| transport(&url, &e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_ascii_lowercase(), value.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(|e| transport(&url, &e))?;

        debug!(?method, %url, status, "Plugin manager response");
        ensure_success(HttpResponse {
            status,
            url: final_url,
            headers,
            body,
        })
    }
}
