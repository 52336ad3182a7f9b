/******************************************************************************
   Author: rcm-nexus developers
   Date: 16/10/26
******************************************************************************/
use crate::constants::{DEFAULT_NEXUS_URL, DEFAULT_TIMEOUT_SECS};
use crate::utils::config::{get_env_or_default, get_env_or_none, parse_bool};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Connection settings for a Nexus instance
pub struct Config {
    /// Base URL of the Nexus instance, request paths are appended to it
    pub url: String,
    /// Username for basic auth; requests are anonymous when unset
    pub username: Option<String>,
    /// Password for basic auth, never serialized
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    /// Whether TLS certificates are verified
    pub ssl_verify: bool,
    /// Timeout in seconds for each request
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from the environment, loading `.env` first if present
    ///
    /// | Variable           | Default                          |
    /// |--------------------|----------------------------------|
    /// | `NEXUS_URL`        | `http://localhost:8081/nexus`    |
    /// | `NEXUS_USERNAME`   | value of `USER`, else anonymous  |
    /// | `NEXUS_PASSWORD`   | none                             |
    /// | `NEXUS_SSL_VERIFY` | `true`                           |
    /// | `NEXUS_TIMEOUT`    | `30`                             |
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let username: Option<String> =
            get_env_or_none("NEXUS_USERNAME").or_else(|| get_env_or_none("USER"));
        let password: Option<String> = get_env_or_none("NEXUS_PASSWORD");
        if username.is_some() && password.is_none() {
            warn!("NEXUS_PASSWORD not found in environment variables or .env file");
        }

        let ssl_verify = get_env_or_none::<String>("NEXUS_SSL_VERIFY")
            .map(|v| parse_bool(&v))
            .unwrap_or(true);

        Config {
            url: get_env_or_default("NEXUS_URL", String::from(DEFAULT_NEXUS_URL)),
            username,
            password,
            ssl_verify,
            timeout: get_env_or_default("NEXUS_TIMEOUT", DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Creates an anonymous configuration for the given base URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Config {
            url: url.into(),
            username: None,
            password: None,
            ssl_verify: true,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Sets basic-auth credentials
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Password for the configured user
    #[must_use]
    pub fn get_password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Joins a request path onto the base URL.
    ///
    /// Absolute `http(s)://` paths are returned unchanged.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
