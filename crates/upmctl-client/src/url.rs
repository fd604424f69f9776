//! Path building for the plugin manager REST API.

use crate::error::UpmResult;
use url::Url;

/// Login page carrying the product version meta tag.
pub const VERSION_PAGE: &str = "/login.jsp";

/// Root of the plugin manager REST resources.
pub const PLUGINS_ROOT: &str = "/rest/plugins/1.0/";

/// Upload endpoint, authorised by the one-time token.
pub fn upload_path(token: &str) -> String {
    format!("{PLUGINS_ROOT}?token={}", urlencoding::encode(token))
}

/// Status resource of an install task.
pub fn pending_task_path(task_id: &str) -> String {
    format!("{PLUGINS_ROOT}pending/{}", urlencoding::encode(task_id))
}

/// Marketplace metadata of an installed plugin.
pub fn marketplace_path(plugin_key: &str) -> String {
    format!("{PLUGINS_ROOT}{}/marketplace", urlencoding::encode(plugin_key))
}

/// Resource of an installed plugin, addressed by `<key>-key`.
pub fn plugin_path(plugin_key: &str) -> String {
    format!("{PLUGINS_ROOT}{}-key", urlencoding::encode(plugin_key))
}

/// Resolve a `Location` header against the instance base URL.
///
/// Absolute locations are returned unchanged.
pub fn resolve_location(base_url: &str, location: &str) -> UpmResult<Url> {
    let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
    Ok(base.join(location)?)
}
