#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
pub mod headers;
pub mod http;
mod models;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{AtlassianServer, DefaultAtlassianServer};

// Configuration
pub use config::UpmClientConfig;

// Errors
pub use error::{UpmError, UpmResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
