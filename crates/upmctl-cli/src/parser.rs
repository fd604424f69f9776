//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Install and remove plugins on Atlassian instances through the
/// Universal Plugin Manager.
#[derive(Debug, Parser)]
#[command(name = "upmctl")]
#[command(about = "Install and remove plugins on Atlassian instances")]
#[command(version)]
pub struct Cli {
    /// Log filter directive (e.g. `info`, `debug`, `upmctl_client=trace`)
    #[arg(
        long = "log-level",
        global = true,
        env = "LOG_LEVEL",
        default_value = "info"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}
