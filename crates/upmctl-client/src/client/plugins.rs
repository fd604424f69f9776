//! Upload, task polling, marketplace lookup and removal.

use std::path::Path;

use tracing::{debug, error, info};
use upmctl_core::{MarketplaceInfo, TaskStatus, UploadTask};

use super::AtlassianServer;
use crate::error::{UpmError, UpmResult};
use crate::headers;
use crate::http::{HttpBackend, HttpRequest, Target};
use crate::parsing::{parse_marketplace, parse_task, parse_upload};
use crate::url::{
    PLUGINS_ROOT, marketplace_path, pending_task_path, plugin_path, resolve_location, upload_path,
};

/// Response header carrying the one-time upload token.
const UPM_TOKEN_HEADER: &str = "upm-token";

/// Multipart field the upload endpoint reads the artifact from.
const UPLOAD_FIELD: &str = "plugin";

impl<B: HttpBackend> AtlassianServer<B> {
    /// Upload a plugin artifact and return the install task handle.
    ///
    /// Fetches a fresh `upm-token` first. The server must answer 202.
    pub async fn upload_plugin(&self, artifact: &Path) -> UpmResult<UploadTask> {
        info!("Uploading plugin '{}'", artifact.display());
        let token = self.upm_token().await?;

        let bytes = tokio::fs::read(artifact)
            .await
            .map_err(|source| UpmError::Io {
                path: artifact.display().to_string(),
                source,
            })?;
        let file_name = artifact
            .file_name()
            .map_or_else(|| "plugin.jar".to_string(), |n| n.to_string_lossy().into_owned());

        let request = HttpRequest::post(Target::Path(upload_path(&token)))
            .with_headers(headers::NO_CHECK)
            .with_multipart(UPLOAD_FIELD, file_name, bytes);
        let response = self.backend.execute(request).await?;
        debug!(status = response.status, body = %response.body, "Upload response");

        if response.status != 202 {
            error!("Unable to upload plugin");
            return Err(UpmError::UnexpectedStatus {
                expected: 202,
                actual: response.status,
                url: response.url,
            });
        }

        let task = parse_upload(&response.body)?;
        info!(task_id = %task.id, "Plugin uploaded");
        Ok(task)
    }

    async fn upm_token(&self) -> UpmResult<String> {
        let request = HttpRequest::get(Target::Path(PLUGINS_ROOT.to_string()))
            .with_headers(headers::NO_CHECK);
        let response = self.backend.execute(request).await?;
        response
            .header(UPM_TOKEN_HEADER)
            .map(ToString::to_string)
            .ok_or_else(|| UpmError::MissingHeader {
                name: UPM_TOKEN_HEADER,
                url: response.url.clone(),
            })
    }

    /// Fetch the state of an install task.
    ///
    /// Once the task finishes the server redirects to the installed plugin;
    /// the redirect is followed manually so the `Location` is honoured with
    /// the right headers.
    pub async fn pending_task(&self, task_id: &str) -> UpmResult<TaskStatus> {
        debug!(task_id, "Polling install task");
        let request = HttpRequest::get(Target::Path(pending_task_path(task_id)))
            .with_headers(headers::DEFAULT)
            .without_redirects();
        let mut response = self.backend.execute(request).await?;

        if response.is_redirect() {
            let location = response.header("location").ok_or_else(|| UpmError::MissingHeader {
                name: "location",
                url: response.url.clone(),
            })?;
            let target = resolve_location(&self.base_url, location)?;
            info!("Plugin task {task_id} is done, redirecting to {target}");

            let request =
                HttpRequest::get(Target::Url(target.into())).with_headers(headers::NO_CHECK);
            response = self.backend.execute(request).await?;
        }

        parse_task(task_id, &response.body)
    }

    /// Fetch marketplace metadata (license details) of an installed plugin.
    pub async fn marketplace_info(&self, plugin_key: &str) -> UpmResult<MarketplaceInfo> {
        let request = HttpRequest::get(Target::Path(marketplace_path(plugin_key)))
            .with_headers(headers::DEFAULT);
        let response = self.backend.execute(request).await?;
        parse_marketplace(&response.body)
    }

    /// Ask the server to remove a plugin.
    ///
    /// Returns `true` only for 204 No Content; other success statuses mean
    /// the removal did not happen yet.
    pub async fn remove_plugin(&self, plugin_key: &str) -> UpmResult<bool> {
        info!("Removing plugin '{plugin_key}'");
        let request = HttpRequest::delete(Target::Path(plugin_path(plugin_key)))
            .with_headers(headers::NO_CHECK);
        let response = self.backend.execute(request).await?;
        debug!(status = response.status, "Remove response");
        Ok(response.status == 204)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{BASE, server};
    use super::*;
    use crate::http::Method;
    use crate::http::testing::{FakeBackend, FakeReply};
    use serde_json::json;
    use std::io::Write;
    use std::time::Duration;
    use upmctl_core::{LicenseDetails, PluginInfo};

    fn artifact() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("my-plugin")
            .suffix(".jar")
            .tempfile()
            .unwrap();
        file.write_all(b"PK\x03\x04jar bytes").unwrap();
        file
    }

    fn token_route(backend: FakeBackend) -> FakeBackend {
        backend.on(
            Method::Get,
            "/rest/plugins/1.0/",
            FakeReply::ok("{}").with_header("upm-token", "tok-1"),
        )
    }

    #[tokio::test]
    async fn test_upload_sends_token_and_multipart() {
        let backend = token_route(FakeBackend::new(BASE)).on(
            Method::Post,
            "?token=",
            FakeReply::status(202, r#"<textarea>{"id":"task-9"}</textarea>"#),
        );
        let file = artifact();

        let task = server(&backend).upload_plugin(file.path()).await.unwrap();

        assert_eq!(task.id, "task-9");
        let requests = backend.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].headers, headers::NO_CHECK);
        assert_eq!(
            requests[1].url,
            "https://jira.example.com/rest/plugins/1.0/?token=tok-1"
        );
        assert_eq!(requests[1].headers, headers::NO_CHECK);
        let (field, file_name) = requests[1].multipart.clone().unwrap();
        assert_eq!(field, "plugin");
        assert!(file_name.starts_with("my-plugin") && file_name.ends_with(".jar"));
    }

    #[tokio::test]
    async fn test_upload_requires_accepted_status() {
        let backend = token_route(FakeBackend::new(BASE)).on(
            Method::Post,
            "?token=",
            FakeReply::ok(r#"{"id":"task-9"}"#),
        );
        let file = artifact();

        let err = server(&backend).upload_plugin(file.path()).await.unwrap_err();

        assert!(matches!(
            err,
            UpmError::UnexpectedStatus {
                expected: 202,
                actual: 200,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_upload_without_token_header() {
        let backend = FakeBackend::new(BASE).on(Method::Get, "/rest/plugins/1.0/", FakeReply::ok("{}"));
        let file = artifact();

        let err = server(&backend).upload_plugin(file.path()).await.unwrap_err();

        assert!(matches!(err, UpmError::MissingHeader { name: "upm-token", .. }));
        assert_eq!(backend.count(Method::Post, "/rest/plugins/1.0/"), 0);
    }

    #[tokio::test]
    async fn test_upload_missing_artifact_is_io_error() {
        let backend = token_route(FakeBackend::new(BASE));
        let err = server(&backend)
            .upload_plugin(Path::new("/nonexistent/plugin.jar"))
            .await
            .unwrap_err();
        assert!(matches!(err, UpmError::Io { .. }));
    }

    #[tokio::test]
    async fn test_pending_task_reports_progress() {
        let backend = FakeBackend::new(BASE).on(
            Method::Get,
            "/pending/task-9",
            FakeReply::json(
                200,
                &json!({"status": {"done": false, "name": "Installing", "pingAfter": 250}}),
            ),
        );

        let status = server(&backend).pending_task("task-9").await.unwrap();

        assert_eq!(
            status,
            TaskStatus::Pending {
                name: "Installing".to_string(),
                amount_downloaded: None,
                ping_after: Duration::from_millis(250),
            }
        );
        let request = &backend.requests()[0];
        assert!(!request.follow_redirects);
        assert_eq!(request.headers, headers::DEFAULT);
    }

    #[tokio::test]
    async fn test_pending_task_follows_redirect_to_plugin() {
        let backend = FakeBackend::new(BASE)
            .on(
                Method::Get,
                "/pending/task-9",
                FakeReply::redirect("/rest/plugins/1.0/com.example.plugin-key"),
            )
            .on(
                Method::Get,
                "/com.example.plugin-key",
                FakeReply::json(
                    200,
                    &json!({"key": "com.example.plugin", "enabled": true, "version": "1.2.3"}),
                ),
            );

        let status = server(&backend).pending_task("task-9").await.unwrap();

        assert_eq!(
            status,
            TaskStatus::Redirected(PluginInfo {
                key: "com.example.plugin".to_string(),
                enabled: true,
                version: "1.2.3".to_string(),
                uses_licensing: false,
            })
        );
        let requests = backend.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].url,
            "https://jira.example.com/rest/plugins/1.0/com.example.plugin-key"
        );
        assert_eq!(requests[1].headers, headers::NO_CHECK);
    }

    #[tokio::test]
    async fn test_pending_task_unexpected_payload() {
        let backend = FakeBackend::new(BASE).on(
            Method::Get,
            "/pending/task-9",
            FakeReply::ok(r#"{"unexpected":true}"#),
        );
        let err = server(&backend).pending_task("task-9").await.unwrap_err();
        assert!(matches!(err, UpmError::InvalidResponse { ref payload, .. } if payload.contains("unexpected")));
    }

    #[tokio::test]
    async fn test_marketplace_license() {
        let backend = FakeBackend::new(BASE).on(
            Method::Get,
            "/com.example.plugin/marketplace",
            FakeReply::json(
                200,
                &json!({"licenseDetails": {"valid": true, "expiryDateString": "31/Dec/26"}}),
            ),
        );
        let info = server(&backend)
            .marketplace_info("com.example.plugin")
            .await
            .unwrap();
        assert_eq!(
            info.license,
            Some(LicenseDetails {
                valid: true,
                expiry_date: Some("31/Dec/26".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_remove_only_succeeds_on_no_content() {
        let backend = FakeBackend::new(BASE)
            .on(Method::Delete, "/com.example.plugin-key", FakeReply::ok(""))
            .on(Method::Delete, "/com.example.plugin-key", FakeReply::status(204, ""));
        let client = server(&backend);

        assert!(!client.remove_plugin("com.example.plugin").await.unwrap());
        assert!(client.remove_plugin("com.example.plugin").await.unwrap());
        assert_eq!(backend.requests()[0].headers, headers::NO_CHECK);
    }

    #[tokio::test]
    async fn test_remove_server_error_propagates() {
        let backend = FakeBackend::new(BASE).on(
            Method::Delete,
            "/com.example.plugin-key",
            FakeReply::status(500, "busy"),
        );
        let err = server(&backend)
            .remove_plugin("com.example.plugin")
            .await
            .unwrap_err();
        assert!(matches!(err, UpmError::Status { status: 500, .. }));
    }
}
