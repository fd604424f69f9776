//! Install command handler.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};
use upmctl_core::DeployReport;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Argument value that means "read the artifact from stdin".
pub const STDIN_MARKER: &str = "-";

/// Execute the install command.
///
/// `file` is a path, or `-` to spool stdin into a temporary file that is
/// deleted when this function returns.
pub async fn execute(ctx: &CliContext, file: &str) -> Result<DeployReport, CliError> {
    let spooled;
    let artifact: PathBuf = if file == STDIN_MARKER {
        spooled = spool(io::stdin().lock())?;
        spooled.path().to_path_buf()
    } else {
        let path = PathBuf::from(file);
        check_artifact(&path)?;
        path
    };

    let report = ctx.install_service().install(&artifact).await?;
    info!("Install finished");
    println!("{}", report.message);
    Ok(report)
}

/// Copy `reader` into a `.jar` temp file.
pub fn spool(mut reader: impl Read) -> Result<NamedTempFile, CliError> {
    let mut file = tempfile::Builder::new()
        .prefix("upmctl-")
        .suffix(".jar")
        .tempfile()?;
    let bytes = io::copy(&mut reader, &mut file)?;
    file.flush()?;
    if bytes == 0 {
        return Err(CliError::Io("No plugin data on stdin".to_string()));
    }
    debug!(bytes, path = %file.path().display(), "Spooled plugin from stdin");
    Ok(file)
}

fn check_artifact(path: &Path) -> Result<(), CliError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::Io(format!(
            "Plugin file '{}' does not exist",
            path.display()
        )))
    }
}
