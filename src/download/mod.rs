//! Download module for export downloading.
//!
//! This module provides:
//! - Single video downloading
//! - Sequential batch downloading with progress reporting
//! - Batch statistics
//! - The run entry point

pub mod batch;
pub mod item;
pub mod progress;
pub mod runner;
pub mod state;

pub use batch::{download_batch, download_batch_until, CancelFlag};
pub use item::{DownloadOutcome, ItemDownloader};
pub use progress::{ProgressObserver, ProgressUpdate};
pub use runner::{run, Runner};
pub use state::BatchSummary;
