//! PDF download pipeline.
//!
//! This module turns candidate PDF URLs into files on disk: it derives a
//! stable filename for each URL, fetches the document once, checks that the
//! server really returned a non-empty PDF, and only then writes it.
//!
//! # Features
//!
//! - Deterministic, filesystem-safe filenames derived from the URL
//! - Skips documents that are already on disk without sending a request
//! - Rejects non-PDF content types and empty bodies
//! - Buffers the body before creating the file, so failures leave no file
//! - Never overwrites an existing file
//!
//! # Example
//!
//! ```no_run
//! use harvester_core::download::{DownloadOutcome, HttpClient, download_pdf};
//! use std::path::Path;
//!
//! # async fn example() {
//! let client = HttpClient::new();
//! match download_pdf(&client, "https://example.com/paper.pdf", Path::new("./PDFs")).await {
//!     DownloadOutcome::Success { file_path, .. } => println!("saved {}", file_path.display()),
//!     other => println!("{other}"),
//! }
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;
mod filename;
mod outcome;
mod pipeline;

pub use client::HttpClient;
pub use constants::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS, MAX_CONCURRENCY, MAX_TIMEOUT_SECS};
pub use engine::{DownloadStats, EngineError, HarvestEngine, HarvestEntry, HarvestReport};
pub use error::{DownloadError, FailureKind};
pub use filename::{derive_filename, page_cache_filename};
pub use outcome::{DownloadOutcome, SkipReason};
pub use pipeline::download_pdf;

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
