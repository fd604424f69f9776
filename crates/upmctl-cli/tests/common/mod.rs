//! Shared fixtures for full-stack CLI tests.
//!
//! The real `AtlassianServer` runs against a scripted `FakeBackend`, so the
//! whole chain from handler to wire format is exercised without a network.

#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use upmctl_cli::CliContext;
use upmctl_cli::commands::ConnectionArgs;
use upmctl_cli::config::{EnvSettings, resolve};
use upmctl_client::AtlassianServer;
use upmctl_client::http::Method;
use upmctl_client::http::testing::{FakeBackend, FakeReply};
use upmctl_core::{Notification, NotificationResult, NotifierPort};

pub const BASE: &str = "https://jira.example.com";
pub const HOOK: &str = "https://hooks.example.com/notify";

pub const LOGIN_PAGE: &str =
    r#"<html><head><meta name="ajs-version-number" content="9.12.2"></head></html>"#;

/// Notifier that records every call.
#[derive(Default)]
pub struct RecordingNotifier {
    pub calls: Mutex<Vec<(Vec<String>, Notification)>>,
}

impl RecordingNotifier {
    pub fn calls(&self) -> Vec<(Vec<String>, Notification)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotifierPort for RecordingNotifier {
    async fn notify(&self, endpoints: &[String], notification: &Notification) -> NotificationResult {
        self.calls
            .lock()
            .unwrap()
            .push((endpoints.to_vec(), notification.clone()));
        NotificationResult::AllSent
    }
}

/// Flags as a user would pass them.
pub fn args(timeout_secs: u64) -> ConnectionArgs {
    ConnectionArgs {
        url: Some(BASE.to_string()),
        username: Some("admin".to_string()),
        password: Some("secret".to_string()),
        notify: vec![HOOK.to_string()],
        timeout: timeout_secs,
    }
}

/// Context wired to the fake backend and a recording notifier.
pub fn context(
    args: &ConnectionArgs,
    retry_interval: Option<Duration>,
    backend: &FakeBackend,
    notifier: &Arc<RecordingNotifier>,
) -> CliContext {
    let config = resolve(args, retry_interval, &EnvSettings::default());
    CliContext::new(
        config,
        Arc::new(AtlassianServer::with_backend(BASE, backend.clone())),
        notifier.clone(),
    )
}

/// Backend that answers the version probe and the token request.
pub fn instance() -> FakeBackend {
    FakeBackend::new(BASE)
        .on(Method::Get, "/login.jsp", FakeReply::ok(LOGIN_PAGE))
        .on(
            Method::Get,
            "/rest/plugins/1.0/",
            FakeReply::ok("{}").with_header("upm-token", "tok-1"),
        )
}

/// A plugin artifact on disk.
pub fn artifact() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("my-plugin")
        .suffix(".jar")
        .tempfile()
        .unwrap();
    file.write_all(b"PK\x03\x04plugin bytes").unwrap();
    file
}
