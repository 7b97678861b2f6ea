//! Post-download inspection of the destination file.
//!
//! Everything here is diagnostic. Problems found after the write loop
//! (missing file, size mismatch) are logged at warn level and never turned
//! into errors; callers that need a stronger contract must check the file
//! themselves.

use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

/// Facts about the destination file gathered after a download completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FileReport {
    pub exists: bool,
    pub size: u64,
    pub readable: bool,
    pub writable: bool,
}

/// Outcome of comparing the actual file size against the declared total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SizeCheck {
    /// No content length was declared; nothing to compare.
    NotChecked,
    Match,
    Mismatch { expected: u64, actual: u64 },
}

impl FileReport {
    /// Compares the observed size against the declared total, when known.
    pub(crate) fn size_check(&self, expected: u64) -> SizeCheck {
        if expected == 0 {
            SizeCheck::NotChecked
        } else if self.size == expected {
            SizeCheck::Match
        } else {
            SizeCheck::Mismatch {
                expected,
                actual: self.size,
            }
        }
    }
}

/// Gathers facts about `path` without logging anything.
///
/// Readability and writability are probed by actually opening the file with
/// the current process credentials; the write probe uses append mode so it
/// never truncates.
pub(crate) async fn inspect(path: &Path) -> FileReport {
    let size = match fs::metadata(path).await {
        Ok(meta) => meta.len(),
        Err(_) => {
            return FileReport {
                exists: false,
                size: 0,
                readable: false,
                writable: false,
            };
        }
    };

    let readable = fs::OpenOptions::new().read(true).open(path).await.is_ok();
    let writable = fs::OpenOptions::new().append(true).open(path).await.is_ok();

    FileReport {
        exists: true,
        size,
        readable,
        writable,
    }
}

/// Inspects the destination and logs the post-download diagnostics.
///
/// `expected` is the content length declared by the server, 0 when unknown.
#[allow(clippy::cast_precision_loss)]
pub(crate) async fn log_report(path: &Path, expected: u64) {
    let report = inspect(path).await;

    if !report.exists {
        warn!(
            path = %path.display(),
            "download may have failed: destination missing after write"
        );
        return;
    }

    info!(path = %path.display(), "download completed");
    info!(
        bytes = report.size,
        mib = %format!("{:.2}", report.size as f64 / (1024.0 * 1024.0)),
        "downloaded file size"
    );

    match report.size_check(expected) {
        SizeCheck::NotChecked => {}
        SizeCheck::Match => {
            info!(expected, "file size matches expected size");
        }
        SizeCheck::Mismatch { expected, actual } => {
            warn!(expected, actual, "file size mismatch");
        }
    }

    info!(
        readable = report.readable,
        writable = report.writable,
        "file permissions"
    );
}
