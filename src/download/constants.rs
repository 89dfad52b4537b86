//! Constants for the download module (timeouts, concurrency bounds).

/// Default total request timeout in seconds (connect + headers + body).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound accepted for a configured request timeout (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default number of concurrent downloads (sequential processing).
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
pub const MAX_CONCURRENCY: usize = 16;

/// MIME type a response must declare before its body is kept.
pub(crate) const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Extension appended to derived filenames that do not already end in it.
pub(crate) const PDF_EXTENSION: &str = ".pdf";

/// Extension used for cached seed page HTML.
pub(crate) const HTML_EXTENSION: &str = ".html";
