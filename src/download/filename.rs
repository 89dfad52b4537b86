//! Filename derivation for downloaded PDFs.
//!
//! The name is a pure function of the URL: host, path, and query are folded
//! into one flat, lowercase, filesystem-safe name that always ends in `.pdf`.
//! Re-running against the same URL therefore lands on the same path, which is
//! what lets the pipeline skip documents that are already on disk.

use std::borrow::Cow;

use url::Url;

use super::constants::{HTML_EXTENSION, PDF_EXTENSION};
use super::error::DownloadError;

/// Derives the on-disk filename for a PDF URL.
///
/// Layout: `host[_port][_path][_query].pdf`, where `/` in the path and `&`
/// in the query become `_`, the characters `" \ / : * ? < > |` become `_`,
/// and the whole name is lowercased.
///
/// # Errors
///
/// Returns [`DownloadError::InvalidUrl`] when `raw_url` is not an absolute URL.
///
/// # Examples
///
/// ```
/// use harvester_core::derive_filename;
///
/// let name = derive_filename("https://Example.com/a/b.pdf?x=1&y=2").unwrap();
/// assert_eq!(name, "example.com_a_b.pdf_x=1_y=2.pdf");
/// ```
pub fn derive_filename(raw_url: &str) -> Result<String, DownloadError> {
    let parsed = Url::parse(raw_url).map_err(|_| DownloadError::invalid_url(raw_url))?;
    Ok(filename_for_url(&parsed))
}

/// Derives the filename for an already-parsed URL.
#[must_use]
pub(crate) fn filename_for_url(url: &Url) -> String {
    let mut name = flatten_url(url);
    if !has_pdf_extension(&name) {
        name.push_str(PDF_EXTENSION);
    }
    name.to_lowercase()
}

/// Derives the cache filename used to store a seed page's HTML.
///
/// Uses the same flattening as PDF names with an `.html` extension.
#[must_use]
pub fn page_cache_filename(url: &Url) -> String {
    let mut name = flatten_url(url);
    name.push_str(HTML_EXTENSION);
    name.to_lowercase()
}

/// Folds host, port, path, and query into one sanitized name.
fn flatten_url(url: &Url) -> String {
    let mut name = url.host_str().unwrap_or_default().to_string();
    if let Some(port) = url.port() {
        name.push(':');
        name.push_str(&port.to_string());
    }

    let path = decoded_path(url);
    let path = path.trim_start_matches('/');
    if !path.is_empty() {
        name.push('_');
        name.push_str(&path.replace('/', "_"));
    }

    if let Some(query) = url.query()
        && !query.is_empty()
    {
        name.push('_');
        name.push_str(&query.replace('&', "_"));
    }

    sanitize_filename(&name)
}

/// Percent-decodes the URL path, keeping the encoded form when the bytes are not UTF-8.
fn decoded_path(url: &Url) -> Cow<'_, str> {
    urlencoding::decode(url.path()).unwrap_or(Cow::Borrowed(url.path()))
}

/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > | and control characters.
pub(crate) fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn has_pdf_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(PDF_EXTENSION)
}
