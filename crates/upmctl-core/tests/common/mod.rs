//! Shared fakes for orchestrator tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use upmctl_core::{
    DeployConfig, InstanceConfig, MarketplaceInfo, Notification, NotificationResult, NotifierPort,
    NotifyConfig, PluginInfo, ServerVersion, TaskStatus, UpmPortError, UpmPortResult,
    UpmServerPort, UploadTask,
};

pub const TEST_URL: &str = "https://jira.example.com";
pub const TEST_ENDPOINT: &str = "https://hooks.example.com/notify";

mock! {
    pub Notifier {}

    #[async_trait]
    impl NotifierPort for Notifier {
        async fn notify(&self, endpoints: &[String], notification: &Notification) -> NotificationResult;
    }
}

/// Deploy config pointing at the fake instance.
pub fn config(timeout_secs: u64, endpoints: &[&str]) -> DeployConfig {
    DeployConfig::new(InstanceConfig {
        url: TEST_URL.to_string(),
        username: "admin".to_string(),
        password: "secret".to_string(),
    })
    .with_timeout(Duration::from_secs(timeout_secs))
    .with_retry_interval(Duration::from_secs(1))
    .with_notify(NotifyConfig {
        endpoints: endpoints.iter().map(ToString::to_string).collect(),
        title: "Plugin Remote Install".to_string(),
    })
}

pub fn plugin(key: &str, version: &str, uses_licensing: bool) -> PluginInfo {
    PluginInfo {
        key: key.to_string(),
        enabled: true,
        version: version.to_string(),
        uses_licensing,
    }
}

pub fn pending(ping_after_ms: u64) -> TaskStatus {
    TaskStatus::Pending {
        name: "Installing plugin".to_string(),
        amount_downloaded: Some(1024),
        ping_after: Duration::from_millis(ping_after_ms),
    }
}

/// How the fake answers the version probe.
pub enum VersionScript {
    Answer(ServerVersion),
    RejectCredentials,
}

/// How the fake answers a poll once the script is exhausted or empty.
pub enum PollScript {
    Status(TaskStatus),
    Garbled,
}

/// Scripted plugin manager. The last scripted answer repeats forever.
pub struct FakeServer {
    version: VersionScript,
    upload_status: Option<u16>,
    polls: Mutex<VecDeque<PollScript>>,
    marketplace: Option<MarketplaceInfo>,
    removals: Mutex<VecDeque<UpmPortResult<bool>>>,
    calls: AtomicUsize,
    uploads: AtomicUsize,
    poll_calls: AtomicUsize,
    remove_calls: AtomicUsize,
}

impl Default for FakeServer {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeServer {
    pub fn new() -> Self {
        Self {
            version: VersionScript::Answer(ServerVersion::Detected("9.12.2".to_string())),
            upload_status: None,
            polls: Mutex::new(VecDeque::new()),
            marketplace: None,
            removals: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            uploads: AtomicUsize::new(0),
            poll_calls: AtomicUsize::new(0),
            remove_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_version(mut self, version: VersionScript) -> Self {
        self.version = version;
        self
    }

    pub fn rejecting_upload(mut self, status: u16) -> Self {
        self.upload_status = Some(status);
        self
    }

    pub fn with_polls(self, polls: impl IntoIterator<Item = TaskStatus>) -> Self {
        self.polls
            .lock()
            .unwrap()
            .extend(polls.into_iter().map(PollScript::Status));
        self
    }

    pub fn with_garbled_poll(self) -> Self {
        self.polls.lock().unwrap().push_back(PollScript::Garbled);
        self
    }

    pub fn with_marketplace(mut self, marketplace: MarketplaceInfo) -> Self {
        self.marketplace = Some(marketplace);
        self
    }

    pub fn with_removals(self, removals: impl IntoIterator<Item = UpmPortResult<bool>>) -> Self {
        self.removals.lock().unwrap().extend(removals);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn poll_calls(&self) -> usize {
        self.poll_calls.load(Ordering::SeqCst)
    }

    pub fn remove_calls(&self) -> usize {
        self.remove_calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn clone_result(result: &UpmPortResult<bool>) -> UpmPortResult<bool> {
    match result {
        Ok(removed) => Ok(*removed),
        Err(err) => Err(UpmPortError::Http {
            status: 500,
            url: format!("{TEST_URL}/rest/plugins/1.0/"),
            body: err.to_string(),
        }),
    }
}

#[async_trait]
impl UpmServerPort for FakeServer {
    async fn detect_version(&self) -> UpmPortResult<ServerVersion> {
        self.record();
        match &self.version {
            VersionScript::Answer(version) => Ok(version.clone()),
            VersionScript::RejectCredentials => Err(UpmPortError::AuthRejected {
                url: format!("{TEST_URL}/login.jsp"),
            }),
        }
    }

    async fn upload_plugin(&self, _artifact: &Path) -> UpmPortResult<UploadTask> {
        self.record();
        self.uploads.fetch_add(1, Ordering::SeqCst);
        match self.upload_status {
            None => Ok(UploadTask {
                id: "task-1".to_string(),
            }),
            Some(actual) => Err(UpmPortError::UnexpectedStatus {
                expected: 202,
                actual,
                url: format!("{TEST_URL}/rest/plugins/1.0/"),
            }),
        }
    }

    async fn pending_task(&self, task_id: &str) -> UpmPortResult<TaskStatus> {
        self.record();
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        let mut polls = self.polls.lock().unwrap();
        let script = if polls.len() > 1 {
            polls.pop_front()
        } else {
            polls.front().map(|script| match script {
                PollScript::Status(status) => PollScript::Status(status.clone()),
                PollScript::Garbled => PollScript::Garbled,
            })
        };
        match script {
            Some(PollScript::Status(status)) => Ok(status),
            Some(PollScript::Garbled) | None => Err(UpmPortError::Protocol {
                message: format!("Task {task_id} has unexpected response"),
                payload: r#"{"unexpected":true}"#.to_string(),
            }),
        }
    }

    async fn marketplace_info(&self, plugin_key: &str) -> UpmPortResult<MarketplaceInfo> {
        self.record();
        self.marketplace.clone().ok_or_else(|| UpmPortError::Http {
            status: 404,
            url: format!("{TEST_URL}/rest/plugins/1.0/{plugin_key}/marketplace"),
            body: String::new(),
        })
    }

    async fn remove_plugin(&self, _plugin_key: &str) -> UpmPortResult<bool> {
        self.record();
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        let mut removals = self.removals.lock().unwrap();
        if removals.len() > 1 {
            removals.pop_front().unwrap_or(Ok(false))
        } else {
            removals.front().map_or(Ok(false), clone_result)
        }
    }
}
