//! Seed URL validation and candidate URL assembly.

use std::collections::HashSet;

use tracing::{debug, trace};
use url::Url;

use super::error::SourceError;
use crate::extract::dedupe_links;

/// PDF links found on one page, with the page URL when it is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    /// URL the HTML came from. `None` for a local file with no base URL.
    pub page_url: Option<Url>,
    /// PDF hrefs in document order, duplicates included.
    pub links: Vec<String>,
}

/// Validates a seed page URL: absolute, http or https, with a host.
///
/// # Errors
///
/// Returns [`SourceError::InvalidSeed`] describing what is wrong.
///
/// # Examples
///
/// ```
/// use harvester_core::source::parse_seed_url;
///
/// assert!(parse_seed_url("https://www.laballey.com/pages/sds").is_ok());
/// assert!(parse_seed_url("ftp://example.com/").is_err());
/// ```
pub fn parse_seed_url(raw: &str) -> Result<Url, SourceError> {
    let parsed = Url::parse(raw).map_err(|e| SourceError::malformed(raw, &e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(SourceError::unsupported_scheme(raw, scheme)),
    }

    if parsed.host().is_none() {
        return Err(SourceError::no_host(raw));
    }

    Ok(parsed)
}

/// Builds the list of URLs to hand to the download pipeline.
///
/// Links from all pages are concatenated in page order and deduplicated,
/// keeping the first occurrence. With `resolve_relative`, each surviving link
/// is then joined against the page it was first seen on (links that cannot
/// be joined are kept verbatim), and the result is deduplicated once more so
/// that a relative and an absolute spelling of one URL are fetched once.
#[must_use]
pub fn candidate_urls(pages: &[PageLinks], resolve_relative: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for page in pages {
        for link in &page.links {
            if !seen.insert(link.as_str()) {
                trace!(link = %link, "dropping duplicate link");
                continue;
            }
            let candidate = match (&page.page_url, resolve_relative) {
                (Some(base), true) => resolve_against(base, link),
                _ => link.clone(),
            };
            candidates.push(candidate);
        }
    }

    if resolve_relative {
        candidates = dedupe_links(candidates);
    }
    debug!(count = candidates.len(), "assembled candidate URLs");
    candidates
}

fn resolve_against(base: &Url, link: &str) -> String {
    match base.join(link) {
        Ok(joined) => joined.into(),
        Err(e) => {
            debug!(link = %link, error = %e, "could not resolve link, keeping it verbatim");
            link.to_string()
        }
    }
}
