//! The per-URL download pipeline.
//!
//! Each step can end the pipeline early:
//!
//! 1. derive the filename (unparseable URL fails)
//! 2. skip when the file already exists (no request is sent)
//! 3. GET with a bounded timeout (network errors and non-200 fail)
//! 4. require an `application/pdf` content type
//! 5. buffer the whole body in memory (empty bodies fail)
//! 6. create the destination and write the buffer
//!
//! The destination is only created after every check has passed, so a
//! failed attempt leaves the output directory exactly as it was.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use super::client::{self, HttpClient};
use super::constants::PDF_CONTENT_TYPE;
use super::error::DownloadError;
use super::filename::derive_filename;
use super::outcome::{DownloadOutcome, SkipReason};

/// Downloads one PDF into `output_dir`, returning what happened.
///
/// Never panics and never returns an error: every failure is reported as
/// [`DownloadOutcome::Failed`] so callers can carry on with the next URL.
///
/// # Example
///
/// ```no_run
/// use harvester_core::{HttpClient, download_pdf};
/// use std::path::Path;
///
/// # async fn example() {
/// let client = HttpClient::new();
/// let outcome = download_pdf(&client, "https://example.com/sds/acetone.pdf", Path::new("PDFs")).await;
/// println!("{outcome}");
/// # }
/// ```
#[instrument(skip(client), fields(url = %url, output_dir = %output_dir.display()))]
pub async fn download_pdf(client: &HttpClient, url: &str, output_dir: &Path) -> DownloadOutcome {
    match try_download_pdf(client, url, output_dir).await {
        Ok(outcome) => outcome,
        Err(reason) => {
            debug!(error = %reason, kind = %reason.kind(), "download failed");
            DownloadOutcome::Failed { reason }
        }
    }
}

async fn try_download_pdf(
    client: &HttpClient,
    url: &str,
    output_dir: &Path,
) -> Result<DownloadOutcome, DownloadError> {
    let filename = derive_filename(url)?;
    let file_path = output_dir.join(&filename);
    debug!(path = %file_path.display(), "derived output path");

    if is_regular_file(&file_path).await {
        debug!(path = %file_path.display(), "file already exists, skipping");
        return Ok(DownloadOutcome::Skipped {
            reason: SkipReason::AlreadyExists,
            file_path,
        });
    }

    let response = client.get(url).await?;

    let content_type = client::content_type(&response);
    if !is_pdf_content_type(&content_type) {
        return Err(DownloadError::invalid_content_type(url, content_type));
    }

    let body = client::read_body(response, url).await?;
    if body.is_empty() {
        return Err(DownloadError::empty_body(url));
    }

    match write_new_file(&file_path, &body).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            // A directory or other non-file at the path is not an existing download.
            if !is_regular_file(&file_path).await {
                return Err(DownloadError::io(file_path, e));
            }
            // Another URL with the same derived name was committed first.
            debug!(path = %file_path.display(), "file appeared during download, skipping");
            return Ok(DownloadOutcome::Skipped {
                reason: SkipReason::AlreadyExists,
                file_path,
            });
        }
        Err(e) => return Err(DownloadError::io(file_path, e)),
    }

    let bytes_written = body.len() as u64;
    info!(path = %file_path.display(), bytes = bytes_written, "download complete");
    Ok(DownloadOutcome::Success {
        bytes_written,
        file_path,
    })
}

/// True when the declared Content-Type names a PDF (parameters and case ignored).
pub(crate) fn is_pdf_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains(PDF_CONTENT_TYPE)
}

async fn is_regular_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}

/// Creates `path` (failing if it already exists) and writes `data` to it.
///
/// A file left half-written by a failed write is removed before returning.
async fn write_new_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;

    let written = async {
        file.write_all(data).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        if let Err(cleanup) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), error = %cleanup, "failed to remove partial file");
        }
        return Err(e);
    }

    Ok(())
}
