//! Scripted HTTP backend for tests.
//!
//! Routes match on method plus a URL substring; the longest matching
//! substring wins. Each route replays its replies in order and repeats the
//! last one once the script runs out.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use super::{Body, HttpBackend, HttpRequest, HttpResponse, Method, ensure_success};
use crate::error::{UpmError, UpmResult};
use crate::headers::HeaderSet;

/// Canned answer for a route.
#[derive(Debug, Clone)]
pub enum FakeReply {
    Respond {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
    },
    /// Fails as if the TCP connection was refused.
    Refused,
}

impl FakeReply {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Respond {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::status(status, value.to_string())
    }

    /// A 303 pointing at `location`.
    pub fn redirect(location: &str) -> Self {
        Self::status(303, "").with_header("Location", location)
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let Self::Respond { headers, .. } = &mut self {
            headers.push((name.to_ascii_lowercase(), value.to_string()));
        }
        self
    }
}

/// A request as seen by the fake.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderSet,
    pub follow_redirects: bool,
    /// Multipart field and file name, when the body was a form
    pub multipart: Option<(String, String)>,
    pub json: Option<serde_json::Value>,
    pub timeout: Option<Duration>,
}

struct Route {
    method: Method,
    pattern: String,
    replies: VecDeque<FakeReply>,
}

/// A fake HTTP backend that returns scripted replies.
///
/// Clones share routes and the request log, so a test can keep a handle
/// after moving the backend into a client.
#[derive(Clone)]
pub struct FakeBackend {
    base_url: String,
    routes: Arc<Mutex<Vec<Route>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            routes: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append a reply to the route for `method` and `pattern`.
    #[must_use]
    pub fn on(self, method: Method, pattern: &str, reply: FakeReply) -> Self {
        {
            let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(route) = routes
                .iter_mut()
                .find(|r| r.method == method && r.pattern == pattern)
            {
                route.replies.push_back(reply);
            } else {
                routes.push(Route {
                    method,
                    pattern: pattern.to_string(),
                    replies: VecDeque::from([reply]),
                });
            }
        }
        self
    }

    /// All requests executed so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests with `method` whose URL contains `pattern`.
    pub fn count(&self, method: Method, pattern: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url.contains(pattern))
            .count()
    }

    fn next_reply(&self, method: Method, url: &str) -> Option<FakeReply> {
        let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
        let route = routes
            .iter_mut()
            .filter(|r| r.method == method && url.contains(&r.pattern))
            .max_by_key(|r| r.pattern.len())?;
        if route.replies.len() > 1 {
            route.replies.pop_front()
        } else {
            route.replies.front().cloned()
        }
    }
}

#[async_trait]
impl HttpBackend for FakeBackend {
    async fn execute(&self, request: HttpRequest) -> UpmResult<HttpResponse> {
        let url = request.target.resolve(&self.base_url);
        let (multipart, json) = match &request.body {
            Body::Multipart {
                field, file_name, ..
            } => (Some((field.clone(), file_name.clone())), None),
            Body::Json(value) => (None, Some(value.clone())),
            Body::Empty => (None, None),
        };
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method: request.method,
                url: url.clone(),
                headers: request.headers,
                follow_redirects: request.follow_redirects,
                multipart,
                json,
                timeout: request.timeout,
            });

        match self.next_reply(request.method, &url) {
            Some(FakeReply::Respond {
                status,
                headers,
                body,
            }) => ensure_success(HttpResponse {
                status,
                url,
                headers: headers.into_iter().collect::<HashMap<_, _>>(),
                body,
            }),
            Some(FakeReply::Refused) => Err(UpmError::Connection {
                url,
                message: "connection refused".to_string(),
            }),
            None => Err(UpmError::Status {
                status: 404,
                url,
                body: "no route scripted".to_string(),
            }),
        }
    }
}
