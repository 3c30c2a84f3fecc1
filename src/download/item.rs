//! Single video downloading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::engine::{FetchEngine, FetchEvent, FetchOptions};
use crate::error::{Error, Result};
use crate::fs::{ensure_dir, filename_for};
use crate::media::is_supported_url;

/// Result of one download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Video saved at this path.
    Downloaded(PathBuf),
    /// Rejected before any network call.
    Skipped { url: String, reason: String },
    /// The fetch engine failed.
    Failed { url: String, reason: String },
}

impl DownloadOutcome {
    /// Path of the saved video, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            DownloadOutcome::Downloaded(path) => Some(path),
            _ => None,
        }
    }
}

/// Downloads single videos into one directory.
pub struct ItemDownloader {
    engine: Arc<dyn FetchEngine>,
    save_dir: PathBuf,
    options: FetchOptions,
}

impl ItemDownloader {
    /// Create a downloader saving into `save_dir`, creating it if needed.
    pub fn new(
        engine: Arc<dyn FetchEngine>,
        save_dir: PathBuf,
        options: FetchOptions,
    ) -> Result<Self> {
        ensure_dir(&save_dir)?;
        Ok(Self {
            engine,
            save_dir,
            options,
        })
    }

    /// Directory videos are saved into.
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Output path for a video with the given export date.
    pub fn target_path(&self, date: &str) -> PathBuf {
        self.save_dir.join(filename_for(date))
    }

    /// Download one video.
    ///
    /// `on_progress` receives the completion percentage (0-100). Errors are
    /// logged and returned as an outcome, never propagated.
    pub async fn download(
        &self,
        url: &str,
        date: &str,
        on_progress: Option<&(dyn Fn(f64) + Send + Sync)>,
    ) -> DownloadOutcome {
        if !is_supported_url(url) {
            let reason = Error::UnsupportedUrl(url.to_string()).to_string();
            tracing::error!("Error: {}", reason);
            return DownloadOutcome::Skipped {
                url: url.to_string(),
                reason,
            };
        }

        let output_path = self.target_path(date);
        tracing::debug!(
            "Fetching {} to {} with {}",
            url,
            output_path.display(),
            self.engine.name()
        );

        let on_event = |event: FetchEvent| {
            match &event {
                FetchEvent::Downloading { percent, speed, eta } => {
                    let progress = percent
                        .map(|p| format!("{:.1}%", p))
                        .unwrap_or_else(|| "N/A".to_string());
                    tracing::debug!("Downloading: {} at {} ETA: {}", progress, speed, eta);
                }
                FetchEvent::Finished => tracing::debug!("Download completed, finalizing..."),
            }

            if let (Some(callback), Some(percent)) = (on_progress, event.percent()) {
                callback(percent);
            }
        };

        match self
            .engine
            .fetch(url, &output_path, &self.options, &on_event)
            .await
        {
            Ok(()) => {
                tracing::info!("Video successfully downloaded: {}", output_path.display());
                DownloadOutcome::Downloaded(output_path)
            }
            Err(e) => {
                tracing::error!("Error downloading {}: {}", url, e);
                DownloadOutcome::Failed {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}
