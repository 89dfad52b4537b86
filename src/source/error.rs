//! Error types for obtaining seed page HTML.

use std::path::PathBuf;

use thiserror::Error;

use crate::download::DownloadError;

/// Errors that can occur while turning seeds into HTML pages.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Seed URL is malformed or uses an unsupported scheme
    #[error("invalid seed URL '{url}': {reason}\n  Suggestion: {suggestion}")]
    InvalidSeed {
        /// The seed that failed validation
        url: String,
        /// Why the seed is invalid
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The seed page could not be fetched
    #[error("failed to fetch seed page: {source}")]
    Fetch {
        /// Underlying HTTP failure
        #[source]
        source: DownloadError,
    },

    /// A local HTML file could not be read
    #[error("failed to read HTML file {path}: {source}")]
    HtmlFile {
        /// The file that could not be read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// No seed produced any HTML
    #[error("no HTML could be obtained from {attempted} seed page(s)")]
    NoPages {
        /// How many seeds were tried
        attempted: usize,
    },
}

impl SourceError {
    /// Creates an `InvalidSeed` error for a non-web URL scheme.
    #[must_use]
    pub fn unsupported_scheme(url: &str, scheme: &str) -> Self {
        Self::InvalidSeed {
            url: url.to_string(),
            reason: format!("scheme '{scheme}' is not supported"),
            suggestion: "Use http:// or https:// URLs".to_string(),
        }
    }

    /// Creates an `InvalidSeed` error for a malformed URL.
    #[must_use]
    pub fn malformed(url: &str, parse_error: &str) -> Self {
        Self::InvalidSeed {
            url: url.to_string(),
            reason: parse_error.to_string(),
            suggestion: "Check the URL format and try again".to_string(),
        }
    }

    /// Creates an `InvalidSeed` error for a URL without a host.
    #[must_use]
    pub fn no_host(url: &str) -> Self {
        Self::InvalidSeed {
            url: url.to_string(),
            reason: "URL has no host".to_string(),
            suggestion: "Ensure the URL includes a domain (e.g., example.com)".to_string(),
        }
    }

    /// Wraps a page fetch failure.
    #[must_use]
    pub fn fetch(source: DownloadError) -> Self {
        Self::Fetch { source }
    }

    /// Creates an `HtmlFile` error.
    pub fn html_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::HtmlFile {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_unsupported_scheme_message() {
        let err = SourceError::unsupported_scheme("ftp://example.com", "ftp");
        let msg = err.to_string();
        assert!(msg.contains("ftp://example.com"));
        assert!(msg.contains("scheme 'ftp' is not supported"));
        assert!(msg.contains("Use http:// or https://"));
    }

    #[test]
    fn test_source_error_no_pages_message() {
        let err = SourceError::NoPages { attempted: 2 };
        assert_eq!(err.to_string(), "no HTML could be obtained from 2 seed page(s)");
    }

    #[test]
    fn test_source_error_fetch_wraps_download_error() {
        let err = SourceError::fetch(DownloadError::http_status("http://h/", 500));
        assert!(err.to_string().contains("HTTP 500"));
    }
}
