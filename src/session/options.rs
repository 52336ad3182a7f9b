/******************************************************************************
   Author: rcm-nexus developers
   Date: 16/10/26
******************************************************************************/
use crate::constants::{GET_EXPECTED_STATUS, POST_EXPECTED_STATUS, PUT_EXPECTED_STATUS};
use crate::error::AppError;
use crate::session::headers::header_map;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// Per-call settings for a session request
///
/// # Example
/// ```ignore
/// let options = RequestOptions::get()
///     .header("Accept", "application/json")?
///     .ignore_404(true)
///     .fail(false);
/// let reply = session.get_with("/service/local/repositories/foo", options).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Headers overlaid on the session defaults for this call only
    pub headers: Option<HeaderMap>,
    /// Status that counts as success
    pub expect_status: StatusCode,
    /// Treat a 404 as success and hand back its body
    pub ignore_404: bool,
    /// Return an error on failure instead of a reply without body
    pub fail: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    fn expecting(expect_status: StatusCode) -> Self {
        Self {
            headers: None,
            expect_status,
            ignore_404: false,
            fail: true,
        }
    }

    /// Defaults for GET: expect 200
    #[must_use]
    pub fn get() -> Self {
        Self::expecting(GET_EXPECTED_STATUS)
    }

    /// Defaults for POST: expect 201
    #[must_use]
    pub fn post() -> Self {
        Self::expecting(POST_EXPECTED_STATUS)
    }

    /// Defaults for PUT: expect 200
    #[must_use]
    pub fn put() -> Self {
        Self::expecting(PUT_EXPECTED_STATUS)
    }

    /// Adds a single header override
    ///
    /// # Errors
    /// `AppError::InvalidHeader` if the name or value is not valid HTTP
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, AppError> {
        let parsed = header_map([(name, value)])?;
        let headers = self.headers.get_or_insert_with(HeaderMap::new);
        for (header_name, header_value) in parsed {
            if let Some(header_name) = header_name {
                headers.insert(header_name, header_value);
            }
        }
        Ok(self)
    }

    /// Replaces the header overrides
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    #[must_use]
    pub fn expect_status(mut self, status: StatusCode) -> Self {
        self.expect_status = status;
        self
    }

    #[must_use]
    pub fn ignore_404(mut self, ignore: bool) -> Self {
        self.ignore_404 = ignore;
        self
    }

    #[must_use]
    pub fn fail(mut self, fail: bool) -> Self {
        self.fail = fail;
        self
    }

    /// Whether `status` counts as success under these options
    #[must_use]
    pub fn accepts(&self, status: StatusCode) -> bool {
        status == self.expect_status || (self.ignore_404 && status == StatusCode::NOT_FOUND)
    }
}
