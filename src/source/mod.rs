//! Seed pages: where the HTML to scan comes from.
//!
//! Seeds are validated before any request is sent. Each valid seed is loaded
//! (from the page cache when one is configured, otherwise over HTTP) and its
//! PDF links extracted. A seed that fails is logged and skipped; only a run in
//! which no page at all could be loaded is an error.

mod error;
mod loader;
mod seed;

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::extract::extract_pdf_links;

pub use error::SourceError;
pub use loader::PageLoader;
pub use seed::{PageLinks, candidate_urls, parse_seed_url};

/// Loads every seed page and extracts its PDF links, in seed order.
///
/// # Errors
///
/// Returns [`SourceError::NoPages`] when not a single seed produced HTML.
#[instrument(skip(loader, seeds), fields(seed_count = seeds.len()))]
pub async fn gather_from_seeds(
    loader: &PageLoader<'_>,
    seeds: &[String],
) -> Result<Vec<PageLinks>, SourceError> {
    let mut pages = Vec::with_capacity(seeds.len());

    for raw in seeds {
        let seed = match parse_seed_url(raw) {
            Ok(seed) => seed,
            Err(e) => {
                warn!(seed = %raw, error = %e, "skipping invalid seed");
                continue;
            }
        };

        match loader.load(&seed).await {
            Ok(html) => {
                let links = extract_pdf_links(&html);
                info!(seed = %seed, links = links.len(), "scanned seed page");
                pages.push(PageLinks {
                    page_url: Some(seed),
                    links,
                });
            }
            Err(e) => warn!(seed = %seed, error = %e, "failed to load seed page"),
        }
    }

    if pages.is_empty() {
        return Err(SourceError::NoPages {
            attempted: seeds.len(),
        });
    }
    Ok(pages)
}

/// Reads a local HTML file and extracts its PDF links.
///
/// `base_url`, when given, becomes the page URL relative links resolve against.
///
/// # Errors
///
/// Returns [`SourceError::HtmlFile`] when the file cannot be read and
/// [`SourceError::InvalidSeed`] when `base_url` is not an http(s) URL.
pub async fn read_html_file(path: &Path, base_url: Option<&str>) -> Result<PageLinks, SourceError> {
    let page_url = base_url.map(parse_seed_url).transpose()?;
    let html = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SourceError::html_file(path, e))?;

    let links = extract_pdf_links(&html);
    info!(path = %path.display(), links = links.len(), "scanned HTML file");
    Ok(PageLinks { page_url, links })
}
