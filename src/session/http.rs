/******************************************************************************
   Author: rcm-nexus developers
   Date: 16/10/26
******************************************************************************/
//! The Nexus HTTP session.
//!
//! A [`Session`] wraps one [`reqwest::Client`], the default Nexus headers and the
//! basic-auth credentials from [`Config`]. Every request is checked against the
//! status the caller expects; mismatches are reported to the session's
//! diagnostics sink (stderr unless replaced) and then either returned as a
//! [`Reply`] without body or raised as [`AppError::Request`], depending on
//! [`RequestOptions::fail`].
//!
//! # Example
//! ```ignore
//! use rcm_nexus::prelude::*;
//!
//! let session = Session::new(Config::new(), false)?;
//!
//! // Fails with AppError::Request unless the server answers 201
//! session.post("/service/local/staging/profiles", body).await?;
//!
//! // Missing repositories are not an error here
//! let reply = session
//!     .get_with("/service/local/repositories/foo", RequestOptions::get().ignore_404(true))
//!     .await?;
//! ```

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::{AppError, RequestFailure};
use crate::session::headers::{default_headers, merge_headers};
use crate::session::options::RequestOptions;
use crate::session::response::{Reply, ServerErrors, is_json};
use crate::session::stream::ChunkStream;
use reqwest::header::HeaderMap;
use reqwest::{Body, Client, Method, RequestBuilder, StatusCode};
use std::fmt::Display;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::BufWriter;
use tracing::{debug, error, info, warn};

#[derive(Clone)]
struct BasicAuth {
    username: String,
    password: Option<String>,
}

/// Authenticated session against a single Nexus instance
pub struct Session {
    config: Arc<Config>,
    http_client: Client,
    headers: HeaderMap,
    auth: Option<BasicAuth>,
    debug: bool,
    diagnostics: Mutex<Box<dyn Write + Send>>,
}

impl Session {
    /// Creates a session with its own HTTP client
    ///
    /// # Arguments
    /// * `config` - Nexus URL, credentials and TLS settings
    /// * `debug` - Echo every request and response to the diagnostics sink
    ///
    /// # Errors
    /// `AppError::Network` if the HTTP client cannot be built
    pub fn new(config: Config, debug: bool) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(config.timeout))
            .danger_accept_invalid_certs(!config.ssl_verify)
            .build()?;
        Ok(Self::with_client(config, http_client, debug))
    }

    /// Creates a session on top of an existing HTTP client
    pub fn with_client(config: Config, http_client: Client, debug: bool) -> Self {
        let auth = config.username.clone().map(|username| BasicAuth {
            username,
            password: config.password.clone(),
        });
        if auth.is_none() {
            debug!("No username configured, requests to {} are anonymous", config.url);
        }

        Self {
            config: Arc::new(config),
            http_client,
            headers: default_headers(),
            auth,
            debug,
            diagnostics: Mutex::new(Box::new(std::io::stderr())),
        }
    }

    /// Sends failure reports and debug echoes to `writer` instead of stderr
    #[must_use]
    pub fn with_diagnostics<W>(mut self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.diagnostics = Mutex::new(Box::new(writer));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Default headers sent with every request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Username used for basic auth, if any
    pub fn username(&self) -> Option<&str> {
        self.auth.as_ref().map(|auth| auth.username.as_str())
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Default headers with `headers` overlaid; the defaults are left untouched
    pub fn merge_headers(&self, headers: Option<&HeaderMap>) -> HeaderMap {
        merge_headers(&self.headers, headers)
    }

    /// GET expecting 200
    pub async fn get(&self, path: &str) -> Result<Reply, AppError> {
        self.get_with(path, RequestOptions::get()).await
    }

    /// GET with explicit options
    pub async fn get_with(&self, path: &str, options: RequestOptions) -> Result<Reply, AppError> {
        self.request(Method::GET, path, None::<Body>, options).await
    }

    /// POST expecting 201
    pub async fn post<B: Into<Body>>(&self, path: &str, body: B) -> Result<Reply, AppError> {
        self.post_with(path, body, RequestOptions::post()).await
    }

    /// POST with explicit options
    pub async fn post_with<B: Into<Body>>(
        &self,
        path: &str,
        body: B,
        options: RequestOptions,
    ) -> Result<Reply, AppError> {
        self.request(Method::POST, path, Some(body), options).await
    }

    /// PUT expecting 200
    pub async fn put<B: Into<Body>>(&self, path: &str, body: B) -> Result<Reply, AppError> {
        self.put_with(path, body, RequestOptions::put()).await
    }

    /// PUT with explicit options
    pub async fn put_with<B: Into<Body>>(
        &self,
        path: &str,
        body: B,
        options: RequestOptions,
    ) -> Result<Reply, AppError> {
        self.request(Method::PUT, path, Some(body), options).await
    }

    /// Issues a request and checks its status against `options`
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Path relative to the configured Nexus URL, or an absolute URL
    /// * `body` - Optional request body
    /// * `options` - Header overrides, expected status and failure handling
    ///
    /// # Returns
    /// * `Ok(Reply)` with a body when the status was accepted
    /// * `Ok(Reply)` without body when the status was rejected and `options.fail` is false
    /// * `Err(AppError::Request)` when the status was rejected and `options.fail` is true
    /// * `Err(AppError::Network)` when the request could not be sent or read
    pub async fn request<B: Into<Body>>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
        options: RequestOptions,
    ) -> Result<Reply, AppError> {
        let headers = self.merge_headers(options.headers.as_ref());
        let url = self.config.endpoint(path);

        debug!("{} {}", method, url);
        if self.debug {
            self.echo(format_args!("{method} {url}\n{headers:?}"));
        }

        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .headers(headers)
            .timeout(Duration::from_secs(self.config.timeout));
        if let Some(body) = body {
            let body: Body = body.into();
            if self.debug {
                let text = body
                    .as_bytes()
                    .map(String::from_utf8_lossy)
                    .unwrap_or_else(|| "<streamed body>".into());
                self.echo(format_args!("Request body:\n{text}"));
            }
            request = request.body(body);
        }
        request = self.authorize(request);

        let response = request.send().await?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let text = response.text().await?;
        debug!("Response status: {}", status);
        if self.debug {
            self.echo(format_args!("Response data:\n {status}\n\nBody:\n{text}\n"));
        }

        let mut reply = Reply {
            method: method.clone(),
            url,
            status,
            headers: response_headers,
            body: None,
            failure: None,
        };

        if options.accepts(status) {
            reply.body = Some(text);
            return Ok(reply);
        }

        let failure = self.failure(method, path, status, &reply.headers, &text);
        self.report(&failure);
        if options.fail {
            return Err(AppError::Request(failure));
        }
        reply.failure = Some(failure);
        Ok(reply)
    }

    /// Starts a streaming GET of an absolute URL
    ///
    /// No chunk is read until the caller asks for one.
    ///
    /// # Errors
    /// * `AppError::NotFound` on 404
    /// * `AppError::Request` on any other status >= 400, after reporting it
    /// * `AppError::Network` if the request could not be sent
    pub async fn stream(&self, url: &str) -> Result<ChunkStream, AppError> {
        debug!("GET {} (streaming)", url);
        let request = self.authorize(self.http_client.get(url));
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!("{} not found", url);
            return Err(AppError::NotFound {
                url: url.to_string(),
            });
        }
        if status.as_u16() >= 400 {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            let failure = self.failure(Method::GET, url, status, &headers, &text);
            self.report(&failure);
            return Err(AppError::Request(failure));
        }

        Ok(ChunkStream::new(url, response))
    }

    /// Streams `url` into a file at `destination`, returning the bytes written
    ///
    /// The file is only created once the server has accepted the request, and it
    /// is removed again if the transfer fails part way.
    ///
    /// # Errors
    /// Any error from [`Session::stream`], plus `AppError::Io` for local failures
    pub async fn download(&self, url: &str, destination: &Path) -> Result<u64, AppError> {
        let mut chunks = self.stream(url).await?;
        let file = File::create(destination).await?;
        let mut writer = BufWriter::new(file);

        match chunks.write_to(&mut writer).await {
            Ok(written) => {
                info!("Downloaded {} ({} bytes) to {}", url, written, destination.display());
                Ok(written)
            }
            Err(e) => {
                drop(writer);
                if let Err(remove_err) = tokio::fs::remove_file(destination).await {
                    warn!(
                        "Failed to remove partial download {}: {}",
                        destination.display(),
                        remove_err
                    );
                }
                Err(e)
            }
        }
    }

    /// Ends the session
    pub fn close(self) {
        debug!("Closing session for {}", self.config.url);
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(auth) => request.basic_auth(&auth.username, auth.password.as_ref()),
            None => request,
        }
    }

    fn failure(
        &self,
        method: Method,
        path: &str,
        status: StatusCode,
        headers: &HeaderMap,
        text: &str,
    ) -> RequestFailure {
        let server_messages = if is_json(headers) {
            ServerErrors::messages(text).unwrap_or_else(|e| {
                warn!("Unreadable JSON error body from {}: {}", path, e);
                Vec::new()
            })
        } else {
            Vec::new()
        };
        RequestFailure::new(method, path, status, self.username(), server_messages)
    }

    fn report(&self, failure: &RequestFailure) {
        error!("{}", failure);
        let mut out = self.diagnostics.lock().unwrap_or_else(PoisonError::into_inner);
        for line in failure.diagnostic_lines() {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }

    fn echo(&self, message: impl Display) {
        let mut out = self.diagnostics.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(out, "{message}");
    }
}
