#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Runtime is only named by main.rs
use tokio as _;

// Silence unused dev-dependency warnings; these are exercised by the
// integration tests under tests/
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use serde_json as _;

pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap};
pub use commands::{Commands, ConnectionArgs};
pub use config::EnvSettings;
pub use error::CliError;
pub use parser::Cli;
