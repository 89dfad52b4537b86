//! Error types for the download module.
//!
//! Every variant is scoped to a single URL. The pipeline turns these into
//! [`DownloadOutcome::Failed`](super::DownloadOutcome::Failed) so one bad link
//! never stops the rest of a batch.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while downloading a single PDF.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The URL could not be parsed as an absolute URL.
    #[error("unparseable URL: {url}")]
    InvalidUrl {
        /// The raw URL string.
        url: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The server answered with something other than 200 OK.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response did not declare `application/pdf`.
    #[error("invalid content type for {url}: '{content_type}' (expected application/pdf)")]
    InvalidContentType {
        /// The URL whose response was rejected.
        url: String,
        /// The declared Content-Type, empty when the header was missing.
        content_type: String,
    },

    /// Reading the response body failed part-way.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        /// The URL being read.
        url: String,
        /// The underlying stream error.
        #[source]
        source: reqwest::Error,
    },

    /// The server returned an empty body.
    #[error("zero-byte download from {url}; not creating file")]
    EmptyBody {
        /// The URL that returned no bytes.
        url: String,
    },

    /// Creating or writing the destination file failed.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Coarse failure taxonomy used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// URL could not be parsed.
    Parse,
    /// Connection, timeout, non-200 status, or interrupted body.
    Network,
    /// Wrong content type or empty body.
    Validation,
    /// Destination file could not be created or written.
    Io,
}

impl FailureKind {
    /// Returns the stable label used in summaries and JSON reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::Network => "network",
            Self::Validation => "validation",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DownloadError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a content-type rejection error.
    pub fn invalid_content_type(url: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::InvalidContentType {
            url: url.into(),
            content_type: content_type.into(),
        }
    }

    /// Creates a body read error, promoting read timeouts to [`Self::Timeout`].
    pub fn body(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::timeout(url)
        } else {
            Self::Body {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an empty body error.
    pub fn empty_body(url: impl Into<String>) -> Self {
        Self::EmptyBody { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the taxonomy bucket for this error.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidUrl { .. } => FailureKind::Parse,
            Self::Network { .. }
            | Self::Timeout { .. }
            | Self::HttpStatus { .. }
            | Self::Body { .. } => FailureKind::Network,
            Self::InvalidContentType { .. } | Self::EmptyBody { .. } => FailureKind::Validation,
            Self::Io { .. } => FailureKind::Io,
        }
    }
}

// Context (url, path) is required on every variant, so there are no
// `From<reqwest::Error>` / `From<std::io::Error>` impls; use the constructors.
