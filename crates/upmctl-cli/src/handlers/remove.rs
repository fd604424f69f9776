//! Remove command handler.

use tracing::info;
use upmctl_core::DeployReport;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the remove command.
pub async fn execute(ctx: &CliContext, plugin_key: &str) -> Result<DeployReport, CliError> {
    let report = ctx.remove_service().remove(plugin_key).await?;
    info!("Remove finished");
    println!("{}", report.message);
    Ok(report)
}
