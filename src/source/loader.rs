//! Fetching seed pages, with an optional on-disk HTML cache.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use url::Url;

use super::error::SourceError;
use crate::download::{HttpClient, page_cache_filename};

/// Loads seed page HTML over HTTP, reading and filling a cache directory when one is set.
#[derive(Debug)]
pub struct PageLoader<'a> {
    client: &'a HttpClient,
    cache_dir: Option<PathBuf>,
}

impl<'a> PageLoader<'a> {
    /// Creates a loader that always fetches.
    #[must_use]
    pub fn new(client: &'a HttpClient) -> Self {
        Self {
            client,
            cache_dir: None,
        }
    }

    /// Stores fetched pages in `cache_dir` and reuses copies found there.
    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    /// Path the page for `seed` is cached under, if caching is enabled.
    #[must_use]
    pub fn cache_path(&self, seed: &Url) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(page_cache_filename(seed)))
    }

    /// Returns the HTML for `seed`.
    ///
    /// A cached copy wins over the network. A cache that cannot be read or
    /// written is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Fetch`] when the page has to be fetched and the
    /// request fails or answers anything but 200.
    #[instrument(skip(self, seed), fields(seed = %seed))]
    pub async fn load(&self, seed: &Url) -> Result<String, SourceError> {
        let cache_path = self.cache_path(seed);

        if let Some(path) = &cache_path
            && let Some(html) = read_cached(path).await
        {
            info!(path = %path.display(), "using cached page");
            return Ok(html);
        }

        let html = self
            .client
            .fetch_text(seed.as_str())
            .await
            .map_err(SourceError::fetch)?;

        if let Some(path) = &cache_path {
            write_cached(path, &html).await;
        }
        Ok(html)
    }
}

async fn read_cached(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(html) => Some(html),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cached page unreadable, refetching");
            None
        }
    }
}

async fn write_cached(path: &Path, html: &str) {
    if let Some(parent) = path.parent()
        && let Err(e) = tokio::fs::create_dir_all(parent).await
    {
        warn!(dir = %parent.display(), error = %e, "cannot create page cache directory");
        return;
    }
    match tokio::fs::write(path, html).await {
        Ok(()) => debug!(path = %path.display(), bytes = html.len(), "cached page"),
        Err(e) => warn!(path = %path.display(), error = %e, "failed to cache page"),
    }
}
