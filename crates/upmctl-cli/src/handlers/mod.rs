//! Command handlers that delegate to the core services.
//!
//! Handlers follow the same pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<DeployReport, CliError>`
//! - Prepare CLI-specific input (stdin spooling)
//! - Call the service and print the result message to stdout

pub mod install;
pub mod remove;
