//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, sets up logging, then bootstraps the
//! adapters and dispatches to a handler. Failures are logged and turned
//! into the exit code from `CliError::exit_code`.

use std::time::Duration;

use clap::Parser;
use tracing::{debug, error};

use upmctl_cli::config::{EnvSettings, load_dotenv, resolve};
use upmctl_cli::{Cli, CliError, Commands, bootstrap, handlers, logging};

async fn run(cli: Cli) -> Result<(), CliError> {
    let env = EnvSettings::from_env();
    let retry_interval = match &cli.command {
        Commands::Remove { retry_interval, .. } => Some(Duration::from_secs(*retry_interval)),
        Commands::Install { .. } => None,
    };
    let config = resolve(cli.command.connection(), retry_interval, &env);
    let ctx = bootstrap(config)?;

    match &cli.command {
        Commands::Install { file, .. } => {
            handlers::install::execute(&ctx, file).await?;
        }
        Commands::Remove { plugin_key, .. } => {
            handlers::remove::execute(&ctx, plugin_key).await?;
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let dotenv = load_dotenv();
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;
    if let Some(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    if let Err(err) = run(cli).await {
        error!("{err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}
