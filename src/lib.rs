//! Fetchcache Library
//!
//! This library provides a single operation: fetch a remote resource over
//! HTTP(S) and persist it to a local path, skipping the download entirely
//! when the destination already exists. The response body is streamed to
//! disk in chunks, transfer progress is shown on a transient progress bar,
//! and basic post-download diagnostics (size, size match, permissions) are
//! logged after the write completes.
//!
//! # Modules
//!
//! - [`download`] - the `download(source, destination)` operation
//! - [`error`] - structured error types for transport and filesystem faults
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> Result<(), fetchcache::DownloadError> {
//! fetchcache::download("https://example.com/data.bin", "/tmp/out/data.bin").await?;
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod error;
mod progress;
mod verify;

// Re-export commonly used items
pub use download::download;
pub use error::DownloadError;
