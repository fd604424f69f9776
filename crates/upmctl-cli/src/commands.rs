//! Subcommand definitions.

use clap::{Args, Subcommand};
use upmctl_core::{DEFAULT_RETRY_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS};

/// Connection and notification flags shared by every subcommand.
///
/// Unset connection flags fall back to the environment.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// Instance base URL [fallback: ATLAS_URL]
    #[arg(long)]
    pub url: Option<String>,

    /// Account name [fallback: ATLAS_USERNAME]
    #[arg(short = 'u', long)]
    pub username: Option<String>,

    /// Account password [fallback: ATLAS_PASSWORD]
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Notification URL, may be repeated [fallback: NOTIFY_URL]
    #[arg(short = 'n', long = "notify", value_name = "URL")]
    pub notify: Vec<String>,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upload a plugin and wait for the installation to finish
    Install {
        /// Plugin artifact (.jar/.obr), or `-` to read it from stdin
        #[arg(value_name = "FILE")]
        file: String,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Remove an installed plugin
    Remove {
        /// Key of the plugin to remove
        plugin_key: String,

        /// Seconds to wait between removal attempts
        #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_RETRY_INTERVAL_SECS)]
        retry_interval: u64,

        #[command(flatten)]
        connection: ConnectionArgs,
    },
}

impl Commands {
    /// Connection flags of the selected subcommand.
    pub const fn connection(&self) -> &ConnectionArgs {
        match self {
            Self::Install { connection, .. } | Self::Remove { connection, .. } => connection,
        }
    }
}
