//! TikTok Export Downloader - download the videos listed in a TikTok data export.
//!
//! The export (`user_data.json`) lists favorite videos under
//! `Activity / Favorite Videos / FavoriteVideoList` and posted videos under
//! `Video / Videos / VideoList`. Each entry carries a `Link` and a `Date`.
//! Videos are fetched one at a time through a [`FetchEngine`] (yt-dlp by
//! default) and saved as `<output>/<category>/<YYYYMMDDTHHMMSS>.mp4`.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tiktok_export_dl::{run, ProgressUpdate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = |u: &ProgressUpdate| println!("{} ({:.0}%)", u.message, u.fraction * 100.0);
//!     let summary = run(
//!         Path::new("user_data.json"),
//!         Path::new("tiktok_videos"),
//!         "favorites",
//!         Some(&report),
//!     )
//!     .await?;
//!     println!("{} downloaded, {} failed", summary.succeeded, summary.failed);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod engine;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use config::{Category, Config};
pub use download::{
    download_batch, run, BatchSummary, CancelFlag, DownloadOutcome, ItemDownloader,
    ProgressObserver, ProgressUpdate, Runner,
};
pub use engine::{FetchEngine, FetchEvent, FetchOptions, YtDlpEngine};
pub use error::{Error, Result};
pub use fs::filename_for;
pub use media::{extract_favorites, extract_own_items, is_supported_url, VideoRecord};
