/******************************************************************************
   Author: rcm-nexus developers
   Date: 16/10/26
******************************************************************************/
//! # rcm-nexus Prelude
//!
//! Brings the commonly used types into scope.
//!
//! ```rust,ignore
//! use rcm_nexus::prelude::*;
//!
//! let session = Session::new(Config::new(), false)?;
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

pub use crate::config::Config;

pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

pub use crate::error::{AppError, FailureKind, RequestFailure};

// ============================================================================
// SESSION
// ============================================================================

pub use crate::session::{ChunkStream, Reply, RequestOptions, Session};

pub use crate::session::headers::{default_headers, header_map, merge_headers};

// ============================================================================
// UTILITIES
// ============================================================================

pub use crate::utils::logger::setup_logger;

pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

pub use bytes::Bytes;
pub use futures_util::StreamExt;
pub use reqwest::header::HeaderMap;
pub use reqwest::{Method, StatusCode};
pub use tracing::{debug, error, info, warn};
