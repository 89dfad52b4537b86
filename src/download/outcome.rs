//! Per-URL result of running the download pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

use super::error::{DownloadError, FailureKind};

/// Why a URL was skipped without touching the network or the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A regular file with the derived name is already present.
    AlreadyExists,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists => f.write_str("file already exists"),
        }
    }
}

/// Outcome of processing one URL. Produced exactly once per URL.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The PDF was fetched, validated, and written.
    Success {
        /// Number of bytes written to `file_path`.
        bytes_written: u64,
        /// Destination file.
        file_path: PathBuf,
    },
    /// Nothing was done for this URL.
    Skipped {
        /// Why the URL was skipped.
        reason: SkipReason,
        /// The existing file that caused the skip.
        file_path: PathBuf,
    },
    /// The URL could not be turned into a file; no file was left behind.
    Failed {
        /// The error that stopped the pipeline.
        reason: DownloadError,
    },
}

impl DownloadOutcome {
    /// Returns true for [`DownloadOutcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns true for [`DownloadOutcome::Skipped`].
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Returns true for [`DownloadOutcome::Failed`].
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short status label: `success`, `skipped`, or `failed`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }

    /// Destination path for successful or skipped outcomes.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::Success { file_path, .. } | Self::Skipped { file_path, .. } => Some(file_path),
            Self::Failed { .. } => None,
        }
    }

    /// Failure taxonomy bucket, for failed outcomes.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Failed { reason } => Some(reason.kind()),
            _ => None,
        }
    }
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success {
                bytes_written,
                file_path,
            } => write!(f, "downloaded {bytes_written} bytes to {}", file_path.display()),
            Self::Skipped { reason, file_path } => {
                write!(f, "skipped ({reason}): {}", file_path.display())
            }
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}
