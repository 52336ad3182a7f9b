/******************************************************************************
   Author: rcm-nexus developers
   Date: 16/10/26
******************************************************************************/
//! # rcm-nexus
//!
//! Session helper for the Nexus repository manager REST API.
//!
//! The crate wraps a single [`reqwest::Client`] together with the default
//! Nexus headers and optional basic-auth credentials, and takes care of:
//! - Merging per-call headers over the session defaults
//! - Checking response statuses against what the caller expects
//! - Reporting failures (credential and permission hints, server error messages)
//! - Streaming large downloads chunk by chunk
//!
//! # Example
//! ```ignore
//! use rcm_nexus::prelude::*;
//!
//! let session = Session::new(Config::new(), false)?;
//! let reply = session.get("/service/local/status").await?;
//! println!("{}", reply.body().unwrap_or_default());
//! ```

/// Environment backed configuration
pub mod config;
/// Global constants
pub mod constants;
/// Error types
pub mod error;
/// Convenience re-exports
pub mod prelude;
/// The Nexus HTTP session
pub mod session;
/// Environment and logging helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
