//! HTTP client wrapper for page and PDF requests.
//!
//! This module provides the `HttpClient` struct which issues single-attempt
//! GET requests with a bounded timeout and maps every failure onto a
//! context-rich [`DownloadError`].

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use super::constants::DEFAULT_TIMEOUT_SECS;
use super::error::DownloadError;
use crate::user_agent;

/// HTTP client shared by seed page fetches and PDF downloads.
///
/// This client is designed to be created once and reused for every request
/// in a run, taking advantage of connection pooling. Cloning is cheap.
///
/// # Example
///
/// ```no_run
/// use harvester_core::download::HttpClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let html = client.fetch_text("https://example.com/datasheets").await?;
/// println!("fetched {} bytes of HTML", html.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with the default 30 second request timeout.
    ///
    /// Redirects are followed using reqwest's default policy and gzip
    /// decompression is enabled.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with an explicit total request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Sends a GET request and requires a `200 OK` answer.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Timeout`] when the request timed out,
    /// [`DownloadError::Network`] for any other transport failure, and
    /// [`DownloadError::HttpStatus`] for any status other than 200.
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(status = status.as_u16(), "rejecting non-200 response");
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        Ok(response)
    }

    /// Fetches a page and returns its body decoded as text.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`get`](Self::get), plus
    /// [`DownloadError::Body`] when the body cannot be read.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_text(&self, url: &str) -> Result<String, DownloadError> {
        let response = self.get(url).await?;
        let text = response
            .text()
            .await
            .map_err(|e| body_error(url, e))?;
        debug!(bytes = text.len(), "fetched page");
        Ok(text)
    }
}

/// Returns the declared Content-Type of a response, or an empty string.
pub(crate) fn content_type(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Reads the whole response body into memory.
///
/// Nothing touches the filesystem here, so an interrupted transfer leaves no
/// trace on disk.
pub(crate) async fn read_body(
    response: reqwest::Response,
    url: &str,
) -> Result<Vec<u8>, DownloadError> {
    let mut buffer = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| body_error(url, e))?;
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer)
}

/// Maps a body read failure, keeping a timeout distinct from other read errors.
fn body_error(url: &str, error: reqwest::Error) -> DownloadError {
    if error.is_timeout() {
        DownloadError::timeout(url)
    } else {
        DownloadError::body(url, error)
    }
}
