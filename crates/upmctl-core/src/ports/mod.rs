//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the orchestrators expect from
//! infrastructure. They contain no implementation details and use only
//! domain types.

pub mod notifier;
pub mod upm_server;

pub use notifier::{NoopNotifier, NotifierPort};
pub use upm_server::{UpmPortError, UpmPortResult, UpmServerPort};
