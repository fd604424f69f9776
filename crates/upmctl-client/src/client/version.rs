//! Product version detection.

use std::time::Duration;

use tracing::{info, warn};
use upmctl_core::ServerVersion;

use super::AtlassianServer;
use crate::error::{UpmError, UpmResult};
use crate::headers;
use crate::http::{HttpBackend, HttpRequest, Target};
use crate::parsing::parse_version;
use crate::url::VERSION_PAGE;

/// The probe only decides reachability, so it gives up sooner than other calls.
const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

impl<B: HttpBackend> AtlassianServer<B> {
    /// Detect the product version from the login page.
    ///
    /// Fails soft: an instance that cannot be reached yields
    /// `ServerVersion::Unreachable`, and a page without the version marker
    /// yields `ServerVersion::Unknown`. Rejected credentials are errors.
    /// The first answer is cached.
    pub async fn detect_version(&self) -> UpmResult<ServerVersion> {
        self.version
            .get_or_try_init(|| self.probe_version())
            .await
            .cloned()
    }

    async fn probe_version(&self) -> UpmResult<ServerVersion> {
        let request = HttpRequest::get(Target::Path(VERSION_PAGE.to_string()))
            .with_headers(headers::HTML)
            .with_timeout(VERSION_PROBE_TIMEOUT);

        match self.backend.execute(request).await {
            Ok(response) => {
                let version = parse_version(&response.body)
                    .map_or(ServerVersion::Unknown, ServerVersion::Detected);
                info!(version = %version.label(), "Detected instance version");
                Ok(version)
            }
            Err(err @ UpmError::Status {
                status: 401 | 403, ..
            }) => Err(err),
            Err(err) => {
                warn!("Instance '{}' is not reachable: {err}", self.base_url);
                Ok(ServerVersion::Unreachable(err.to_string()))
            }
        }
    }
}
