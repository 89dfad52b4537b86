//! PDF Harvester Core Library
//!
//! This library provides the core functionality for the pdf-harvester tool,
//! which reads a web page, collects every anchor that points at a PDF, and
//! downloads each unique document into a local directory exactly once.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`source`] - Seed page validation, fetching, and the page cache
//! - [`extract`] - HTML anchor traversal and link deduplication
//! - [`download`] - Filename derivation, the per-URL download pipeline,
//!   and the engine that aggregates outcomes across a batch

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod extract;
pub mod source;
mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use download::{
    DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS, DownloadError, DownloadOutcome, DownloadStats,
    EngineError, FailureKind, HarvestEngine, HarvestEntry, HarvestReport, HttpClient,
    MAX_CONCURRENCY, MAX_TIMEOUT_SECS, SkipReason, derive_filename, download_pdf,
};
pub use extract::{dedupe_links, extract_pdf_links, extract_unique_pdf_links};
pub use source::{PageLinks, PageLoader, SourceError, candidate_urls, parse_seed_url};
