/******************************************************************************
   Author: rcm-nexus developers
   Date: 16/10/26
******************************************************************************/
//! Error types for Nexus session operations.
//!
//! Status failures are modelled twice over: [`RequestFailure`] describes what went
//! wrong with a single request and is what gets reported to the diagnostics sink,
//! while [`AppError`] is what callers see when they asked for failures to be fatal.

use crate::constants::{ANONYMOUS_HINT, FORBIDDEN_HINT};
use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Classification of a response whose status did not match the expected one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// 401, the configured credentials were rejected
    Unauthorized {
        /// Username that was sent, if any
        username: Option<String>,
    },
    /// 403, the user lacks permissions for the operation
    Forbidden,
    /// The server answered with a JSON error body listing one or more messages
    ServerReportedErrors,
    /// Any other status mismatch
    UnexpectedStatus,
}

/// A request whose response status did not match what the caller expected
#[derive(Debug, Clone, Error)]
#[error("{method} {path} failed: {}", .status.as_u16())]
pub struct RequestFailure {
    /// HTTP method of the failed request
    pub method: Method,
    /// Path (or absolute URL for streamed downloads) as given by the caller
    pub path: String,
    /// Status the server answered with
    pub status: StatusCode,
    /// Classification of the failure
    pub kind: FailureKind,
    /// `errors[].msg` entries from a JSON error body, in server order
    pub server_messages: Vec<String>,
}

impl RequestFailure {
    /// Classifies a failed response.
    ///
    /// Auth statuses take precedence over a JSON error body; the messages are
    /// kept either way.
    pub fn new(
        method: Method,
        path: impl Into<String>,
        status: StatusCode,
        username: Option<&str>,
        server_messages: Vec<String>,
    ) -> Self {
        let kind = match status {
            StatusCode::UNAUTHORIZED => FailureKind::Unauthorized {
                username: username.map(str::to_string),
            },
            StatusCode::FORBIDDEN => FailureKind::Forbidden,
            _ if !server_messages.is_empty() => FailureKind::ServerReportedErrors,
            _ => FailureKind::UnexpectedStatus,
        };
        Self {
            method,
            path: path.into(),
            status,
            kind,
            server_messages,
        }
    }

    /// Hint for the user, if the status has one
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match &self.kind {
            FailureKind::Unauthorized {
                username: Some(username),
            } => Some(format!(
                "Incorrect credentials for user {username}. Username can be changed by \
                 setting the NEXUS_USERNAME (or USER) env var, or in the .env file."
            )),
            FailureKind::Unauthorized { username: None } => Some(ANONYMOUS_HINT.to_string()),
            FailureKind::Forbidden => Some(FORBIDDEN_HINT.to_string()),
            _ => None,
        }
    }

    /// Lines written to the diagnostics sink for this failure
    #[must_use]
    pub fn diagnostic_lines(&self) -> Vec<String> {
        let mut lines = vec![self.to_string()];
        lines.extend(self.hint());
        lines.extend(self.server_messages.iter().cloned());
        lines
    }
}

/// Main error type for the library
#[derive(Debug, Error)]
pub enum AppError {
    /// Streamed resource does not exist
    #[error("not found: {url}")]
    NotFound {
        /// URL that answered 404
        url: String,
    },
    /// Response status did not match the expected one
    #[error(transparent)]
    Request(#[from] RequestFailure),
    /// Transport level failure (connection, TLS, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// JSON (de)serialization failure
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Local file system failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A header name or value supplied by the caller is not valid HTTP
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

impl AppError {
    /// Status carried by the error, if it came from a server response
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            AppError::Request(failure) => Some(failure.status),
            AppError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Failure classification, for status errors
    #[must_use]
    pub fn kind(&self) -> Option<&FailureKind> {
        match self {
            AppError::Request(failure) => Some(&failure.kind),
            _ => None,
        }
    }
}
