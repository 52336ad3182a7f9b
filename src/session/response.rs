/******************************************************************************
   Author: rcm-nexus developers
   Date: 16/10/26
******************************************************************************/
use crate::error::{AppError, RequestFailure};
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Outcome of a session request
///
/// A reply with `body: None` is a failure that has already been reported to the
/// diagnostics sink; `failure` says what went wrong.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Method of the request
    pub method: Method,
    /// Full URL the request was sent to
    pub url: String,
    /// Status the server answered with
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body text, `None` when the request failed
    pub body: Option<String>,
    /// Failure details when the request failed
    pub failure: Option<RequestFailure>,
}

impl Reply {
    /// Whether the request failed and was reported
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Body text, if the request succeeded
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Response content type, if the server sent one
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        content_type(&self.headers)
    }

    /// Deserializes the body as JSON; `Ok(None)` for a failed request
    ///
    /// # Errors
    /// `AppError::Json` if the body is not valid JSON for `T`
    pub fn json<T: DeserializeOwned>(&self) -> Result<Option<T>, AppError> {
        self.body
            .as_deref()
            .map(serde_json::from_str::<T>)
            .transpose()
            .map_err(AppError::from)
    }

    /// Turns a reported failure back into an error, otherwise yields the body
    ///
    /// # Errors
    /// `AppError::Request` carrying the recorded failure
    pub fn into_result(self) -> Result<String, AppError> {
        match (self.failure, self.body) {
            (Some(failure), _) => Err(AppError::Request(failure)),
            (None, body) => Ok(body.unwrap_or_default()),
        }
    }
}

/// Error body returned by Nexus 3 JSON endpoints
#[derive(Debug, Deserialize)]
pub struct ServerErrors {
    /// Individual errors
    #[serde(default)]
    pub errors: Vec<ServerError>,
}

/// A single error entry in a Nexus JSON error body
#[derive(Debug, Deserialize)]
pub struct ServerError {
    /// Error identifier, if the server sent one
    #[serde(default)]
    pub id: Option<String>,
    /// Human readable message
    pub msg: String,
}

impl ServerErrors {
    /// Parses the messages of a JSON error body
    ///
    /// # Errors
    /// `AppError::Json` if the body is not a Nexus error document
    pub fn messages(body: &str) -> Result<Vec<String>, AppError> {
        let parsed: ServerErrors = serde_json::from_str(body)?;
        Ok(parsed.errors.into_iter().map(|e| e.msg).collect())
    }
}

pub(crate) fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

pub(crate) fn is_json(headers: &HeaderMap) -> bool {
    content_type(headers).is_some_and(|ct| ct.starts_with("application/json"))
}
