//! Streaming HTTP download with skip-if-present caching.
//!
//! The response body is consumed as a lazy stream of chunks and written to
//! the destination as it arrives, so large files are never buffered fully in
//! memory. An existing destination file short-circuits the whole operation:
//! no request is made and the file is taken at face value, even if a prior
//! run left it truncated.

use std::path::Path;

use futures_util::StreamExt;
use indicatif::ProgressBar;
use reqwest::header::CONTENT_LENGTH;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use crate::error::DownloadError;
use crate::progress::transfer_bar;
use crate::verify::log_report;

/// Fetches `source` over HTTP(S) and writes it to `destination`.
///
/// Missing parent directories of `destination` are created. If a file
/// already exists at `destination` the download is skipped entirely.
///
/// After the write completes, diagnostics are logged: file size (raw bytes
/// and MiB), whether it matches the declared content length, and whether the
/// file is readable/writable. A size mismatch is logged as a warning, not
/// returned as an error.
///
/// Concurrent calls targeting the same missing destination are not
/// synchronized: both may pass the existence check and race on file
/// creation.
///
/// # Errors
///
/// Returns [`DownloadError`] if:
/// - The request fails (network error, timeout)
/// - The server returns an error status (4xx, 5xx)
/// - Creating directories or writing the file fails
///
/// There is no retry; every fault is fatal to the call.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> Result<(), fetchcache::DownloadError> {
/// fetchcache::download("https://example.com/data.bin", "/tmp/out/data.bin").await?;
/// # Ok(())
/// # }
/// ```
pub async fn download(source: &str, destination: impl AsRef<Path>) -> Result<(), DownloadError> {
    let destination = destination.as_ref();

    // Cache check: skip before any network activity. Staleness is never
    // re-validated.
    if fs::try_exists(destination).await.unwrap_or(false) {
        info!(
            path = %destination.display(),
            "destination already exists, skipping download"
        );
        return Ok(());
    }

    if let Some(parent) = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| DownloadError::io(parent, e))?;
    }

    debug!(url = %source, path = %destination.display(), "starting download");

    let response = reqwest::Client::new()
        .get(source)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(source)
            } else {
                DownloadError::network(source, e)
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::http_status(source, status.as_u16()));
    }

    let expected = declared_content_length(&response);
    let label = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| destination.display().to_string());
    let bar = transfer_bar(expected, &label);

    let file = File::create(destination)
        .await
        .map_err(|e| DownloadError::io(destination, e))?;
    let mut writer = BufWriter::new(file);

    // Clear the bar on both exit paths; the display must not persist.
    let stream_result = stream_to_file(&mut writer, response, source, destination, &bar).await;
    bar.finish_and_clear();
    let bytes_written = stream_result?;

    debug!(bytes = bytes_written, "body streamed to disk");

    log_report(destination, expected).await;

    Ok(())
}

/// Parses the declared `content-length` header, 0 when absent or non-numeric.
fn declared_content_length(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0)
}

/// Streams the response body to the open file, returning bytes written.
///
/// Extracted so the caller can clear the progress bar regardless of outcome.
/// The file handle itself is owned by the caller and closed on all exit
/// paths when the writer drops.
async fn stream_to_file(
    writer: &mut BufWriter<File>,
    response: reqwest::Response,
    url: &str,
    path: &Path,
    bar: &ProgressBar,
) -> Result<u64, DownloadError> {
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(path, e))?;

        bar.inc(chunk.len() as u64);
        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is on disk before the verification step sizes the file
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(path, e))?;

    Ok(bytes_written)
}
