/******************************************************************************
   Author: rcm-nexus developers
   Date: 16/10/26
******************************************************************************/
use reqwest::StatusCode;

/// User agent string sent with every request to the Nexus server
pub const USER_AGENT: &str = concat!("rcm-nexus/", env!("CARGO_PKG_VERSION"));
/// Default `Accept` header value; Nexus 2 speaks XML on its REST endpoints
pub const DEFAULT_ACCEPT: &str = "application/xml";
/// Default `Content-Type` header value
pub const DEFAULT_CONTENT_TYPE: &str = "application/xml";
/// Base URL used when `NEXUS_URL` is not set
pub const DEFAULT_NEXUS_URL: &str = "http://localhost:8081/nexus";
/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Status a GET is expected to answer with unless the caller says otherwise
pub const GET_EXPECTED_STATUS: StatusCode = StatusCode::OK;
/// Status a POST is expected to answer with (resource created)
pub const POST_EXPECTED_STATUS: StatusCode = StatusCode::CREATED;
/// Status a PUT is expected to answer with
pub const PUT_EXPECTED_STATUS: StatusCode = StatusCode::OK;

/// Printed after a 403 response
pub const FORBIDDEN_HINT: &str = "You don't have permissions to perform this action. \
     Contact maintainers of the Nexus instance you are trying to use.";
/// Printed after a 401 response when no username was configured
pub const ANONYMOUS_HINT: &str = "No credentials were sent. \
     Set NEXUS_USERNAME and NEXUS_PASSWORD in the environment or in the .env file.";
