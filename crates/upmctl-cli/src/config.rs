//! Environment settings and resolution of the deploy configuration.
//!
//! Flags win over the environment. The environment is read once into
//! `EnvSettings`; nothing else in the crate touches `std::env`.

use std::path::PathBuf;
use std::time::Duration;

use upmctl_core::{DEFAULT_NOTIFY_TITLE, DeployConfig, InstanceConfig, NotifyConfig};
use upmctl_notify::split_endpoints;

use crate::commands::ConnectionArgs;

pub const ENV_URL: &str = "ATLAS_URL";
pub const ENV_USERNAME: &str = "ATLAS_USERNAME";
pub const ENV_PASSWORD: &str = "ATLAS_PASSWORD";
pub const ENV_NOTIFY_URL: &str = "NOTIFY_URL";
pub const ENV_NOTIFY_TITLE: &str = "NOTIFY_TITLE";

/// Load `.env` from the working directory if present.
///
/// Must run before argument parsing so clap `env` fallbacks see it.
/// Returns the loaded file, for logging once the subscriber is up.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Settings taken from environment variables. Blank values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub notify_urls: Vec<String>,
    pub notify_title: Option<String>,
}

impl EnvSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, for tests and embedding.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            url: get(ENV_URL),
            username: get(ENV_USERNAME),
            password: get(ENV_PASSWORD),
            notify_urls: get(ENV_NOTIFY_URL)
                .map(|raw| split_endpoints(&raw))
                .unwrap_or_default(),
            notify_title: get(ENV_NOTIFY_TITLE),
        }
    }
}

/// Merge flags and environment into a deploy configuration.
///
/// Missing values are left empty; `DeployConfig::validate` reports them.
pub fn resolve(
    args: &ConnectionArgs,
    retry_interval: Option<Duration>,
    env: &EnvSettings,
) -> DeployConfig {
    let pick = |flag: &Option<String>, fallback: &Option<String>| {
        flag.clone()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| fallback.clone())
            .unwrap_or_default()
    };

    let endpoints = if args.notify.is_empty() {
        env.notify_urls.clone()
    } else {
        args.notify.clone()
    };

    let config = DeployConfig::new(InstanceConfig {
        url: pick(&args.url, &env.url),
        username: pick(&args.username, &env.username),
        password: pick(&args.password, &env.password),
    })
    .with_timeout(Duration::from_secs(args.timeout))
    .with_notify(NotifyConfig {
        endpoints,
        title: env
            .notify_title
            .clone()
            .unwrap_or_else(|| DEFAULT_NOTIFY_TITLE.to_string()),
    });

    match retry_interval {
        Some(interval) => config.with_retry_interval(interval),
        None => config,
    }
}
