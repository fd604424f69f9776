//! Deploy orchestrators.
//!
//! Services receive the deploy configuration by reference and their
//! collaborators as port trait objects. They own no global state.

mod error;
mod install;
mod remove;
mod report;

pub use error::{DeployError, FailureKind};
pub use install::{InstallService, MIN_POLL_INTERVAL};
pub use remove::RemoveService;
pub use report::DeployReport;
