//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use harvester_core::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};

/// Collect every PDF linked from one or more web pages.
///
/// pdf-harvester fetches each seed page, finds the anchors whose href ends in
/// `.pdf`, and downloads each unique document into a local directory once.
#[derive(Parser, Debug, Clone)]
#[command(name = "pdf-harvester")]
#[command(author, version, about)]
pub struct Args {
    /// Seed page URLs to scan for PDF links
    pub seeds: Vec<String>,

    /// Directory to write PDFs into [default: PDFs]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Maximum concurrent downloads (1-16)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub concurrency: u8,

    /// HTTP request timeout in seconds (1-3600)
    #[arg(short = 't', long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout_secs: u64,

    /// Cache seed page HTML in this directory and reuse cached copies
    #[arg(long)]
    pub page_cache: Option<PathBuf>,

    /// Read HTML from a local file instead of fetching seed pages
    #[arg(long, conflicts_with = "seeds")]
    pub html_file: Option<PathBuf>,

    /// Base URL for resolving relative links found in --html-file
    #[arg(long, requires = "html_file")]
    pub base_url: Option<String>,

    /// Resolve relative PDF links against the page they were found on
    #[arg(long)]
    pub resolve_relative: bool,

    /// Print a JSON report of every outcome to stdout
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
