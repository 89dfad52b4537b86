//! Batch driver for the download pipeline.
//!
//! The engine runs [`download_pdf`] over a list of URLs, either strictly one
//! after another (the default) or with a bounded number in flight, and
//! collects every outcome in input order.
//!
//! # Example
//!
//! ```no_run
//! use harvester_core::{HarvestEngine, HttpClient};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = HarvestEngine::new(1)?;
//! let client = HttpClient::new();
//! let urls = vec!["https://example.com/a.pdf".to_string()];
//! let report = engine.run(&client, &urls, Path::new("PDFs")).await;
//! println!("succeeded: {}, skipped: {}, failed: {}", report.succeeded(), report.skipped(), report.failed());
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::StreamExt;
use futures_util::stream;
use tracing::{debug, info, instrument, warn};

use super::client::HttpClient;
use super::constants::{DEFAULT_CONCURRENCY, MAX_CONCURRENCY};
use super::outcome::DownloadOutcome;
use super::pipeline::download_pdf;

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Error type for download engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },
}

/// Live counters for a harvest run.
///
/// Updated as each URL finishes so a progress display can poll them while
/// the run is still going.
#[derive(Debug, Default)]
pub struct DownloadStats {
    succeeded: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

impl DownloadStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of files written.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::SeqCst)
    }

    /// Returns the number of URLs skipped because the file already existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::SeqCst)
    }

    /// Returns the number of failed URLs.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Returns the number of URLs processed so far.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded() + self.skipped() + self.failed()
    }

    fn record(&self, outcome: &DownloadOutcome) {
        let counter = match outcome {
            DownloadOutcome::Success { .. } => &self.succeeded,
            DownloadOutcome::Skipped { .. } => &self.skipped,
            DownloadOutcome::Failed { .. } => &self.failed,
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

/// One URL and what happened to it.
#[derive(Debug)]
pub struct HarvestEntry {
    /// The URL as handed to the pipeline.
    pub url: String,
    /// The pipeline outcome.
    pub outcome: DownloadOutcome,
}

/// Outcomes of a harvest run, in the order the URLs were given.
#[derive(Debug, Default)]
pub struct HarvestReport {
    entries: Vec<HarvestEntry>,
}

impl HarvestReport {
    /// All entries in input order.
    #[must_use]
    pub fn entries(&self) -> &[HarvestEntry] {
        &self.entries
    }

    /// Number of files written.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.count(DownloadOutcome::is_success)
    }

    /// Number of URLs skipped.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(DownloadOutcome::is_skipped)
    }

    /// Number of failed URLs.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(DownloadOutcome::is_failed)
    }

    /// Total number of URLs processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Failed entries, in input order.
    pub fn failures(&self) -> impl Iterator<Item = &HarvestEntry> {
        self.entries.iter().filter(|entry| entry.outcome.is_failed())
    }

    fn count(&self, predicate: fn(&DownloadOutcome) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.outcome))
            .count()
    }
}

impl FromIterator<HarvestEntry> for HarvestReport {
    fn from_iter<I: IntoIterator<Item = HarvestEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Runs the download pipeline over a batch of URLs.
///
/// # Concurrency Model
///
/// - At most `concurrency` downloads are in flight at once
/// - With the default of 1 each URL is fully processed before the next starts
/// - Outcomes are reported in input order regardless of completion order
/// - Two URLs that derive the same filename never overwrite each other: the
///   first to commit wins and the other is reported as skipped
#[derive(Debug)]
pub struct HarvestEngine {
    concurrency: usize,
    stats: Arc<DownloadStats>,
}

impl HarvestEngine {
    /// Creates a new engine with the specified concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-16).
    ///
    /// # Example
    ///
    /// ```
    /// use harvester_core::HarvestEngine;
    ///
    /// let engine = HarvestEngine::new(4).unwrap();
    /// assert_eq!(engine.concurrency(), 4);
    /// assert!(HarvestEngine::new(0).is_err());
    /// ```
    #[instrument(level = "debug")]
    pub fn new(concurrency: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }

        debug!(concurrency, "creating harvest engine");
        Ok(Self {
            concurrency,
            stats: Arc::new(DownloadStats::new()),
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns a handle to the live counters of this engine.
    #[must_use]
    pub fn stats(&self) -> Arc<DownloadStats> {
        Arc::clone(&self.stats)
    }

    /// Downloads every URL into `output_dir` and returns the per-URL outcomes.
    ///
    /// Individual failures never stop the batch; they are recorded in the
    /// report and logged.
    #[instrument(skip(self, client, urls), fields(url_count = urls.len(), output_dir = %output_dir.display()))]
    pub async fn run(&self, client: &HttpClient, urls: &[String], output_dir: &Path) -> HarvestReport {
        info!(concurrency = self.concurrency, "starting harvest");

        let entries: Vec<HarvestEntry> = stream::iter(urls)
            .map(|url| async move {
                let outcome = download_pdf(client, url, output_dir).await;
                self.stats.record(&outcome);
                log_outcome(url, &outcome);
                HarvestEntry {
                    url: url.clone(),
                    outcome,
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let report = HarvestReport { entries };
        info!(
            succeeded = report.succeeded(),
            skipped = report.skipped(),
            failed = report.failed(),
            total = report.total(),
            "harvest complete"
        );
        report
    }
}

impl Default for HarvestEngine {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            stats: Arc::new(DownloadStats::new()),
        }
    }
}

fn log_outcome(url: &str, outcome: &DownloadOutcome) {
    match outcome {
        DownloadOutcome::Success {
            bytes_written,
            file_path,
        } => info!(url = %url, bytes = bytes_written, path = %file_path.display(), "saved PDF"),
        DownloadOutcome::Skipped { reason, file_path } => {
            debug!(url = %url, reason = %reason, path = %file_path.display(), "skipped PDF");
        }
        DownloadOutcome::Failed { reason } => {
            warn!(url = %url, kind = %reason.kind(), error = %reason, "PDF download failed");
        }
    }
}
