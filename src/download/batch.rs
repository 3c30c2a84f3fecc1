//! Sequential batch downloading.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;

use crate::download::item::{DownloadOutcome, ItemDownloader};
use crate::download::progress::{ProgressObserver, ProgressUpdate};
use crate::download::state::BatchSummary;
use crate::media::VideoRecord;

/// Cooperative stop signal, checked before each video.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the batch to stop before the next video.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Download every record that has both a `Link` and a `Date`, in order.
pub async fn download_batch(
    downloader: &ItemDownloader,
    records: &[Value],
    observer: Option<&dyn ProgressObserver>,
) -> BatchSummary {
    download_batch_until(downloader, records, observer, &CancelFlag::default()).await
}

/// Like [`download_batch`], stopping early once `cancel` is set.
pub async fn download_batch_until(
    downloader: &ItemDownloader,
    records: &[Value],
    observer: Option<&dyn ProgressObserver>,
    cancel: &CancelFlag,
) -> BatchSummary {
    let videos: Vec<VideoRecord> = records.iter().filter_map(VideoRecord::from_value).collect();
    let total = videos.len();
    let mut summary = BatchSummary::new(records.len(), total);

    tracing::info!("Found {} videos to download", total);
    if summary.invalid() > 0 {
        tracing::warn!(
            "Ignoring {} entries without a link or date",
            summary.invalid()
        );
    }

    for (i, video) in videos.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::warn!("Cancelled before video {} of {}", i + 1, total);
            summary.cancelled = true;
            break;
        }

        let message = format!("Downloading video {} of {}", i + 1, total);
        tracing::info!("{}", message);

        let forward = |percent: f64| {
            if let Some(observer) = observer {
                observer.on_progress(&ProgressUpdate {
                    index: i,
                    total,
                    fraction: (percent / 100.0).clamp(0.0, 1.0),
                    message: message.clone(),
                });
            }
        };
        let on_progress: Option<&(dyn Fn(f64) + Send + Sync)> = match observer {
            Some(_) => Some(&forward),
            None => None,
        };

        let outcome = AssertUnwindSafe(downloader.download(&video.link, &video.date, on_progress))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                let reason = panic_reason(panic.as_ref());
                tracing::error!("Error downloading {}: {}", video.link, reason);
                DownloadOutcome::Failed {
                    url: video.link.clone(),
                    reason,
                }
            });

        summary.record(&outcome);
    }

    if let Some(observer) = observer {
        if !summary.cancelled && total > 0 {
            observer.on_progress(&ProgressUpdate {
                index: total,
                total,
                fraction: 1.0,
                message: "Download complete!".to_string(),
            });
        }
    }

    summary
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("engine panicked: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("engine panicked: {}", s)
    } else {
        "engine panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::RecordingEngine;
    use crate::engine::FetchOptions;
    use serde_json::json;
    use std::path::Path;
    use std::sync::Mutex;

    fn setup(engine: Arc<RecordingEngine>, dir: &Path) -> ItemDownloader {
        ItemDownloader::new(engine, dir.join("favorites"), FetchOptions::default()).unwrap()
    }

    fn record(id: &str, date: &str) -> Value {
        json!({"Link": format!("https://vm.tiktok.com/{}", id), "Date": date})
    }

    #[tokio::test]
    async fn test_only_complete_records_downloaded_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(RecordingEngine::new());
        let downloader = setup(engine.clone(), dir.path());

        let records = vec![
            record("A", "2025-01-01 00:00:01"),
            json!({"Link": "https://vm.tiktok.com/NODATE"}),
            record("B", "2025-01-01 00:00:02"),
            json!({"Date": "2025-01-01 00:00:03"}),
            json!({"Link": "", "Date": "2025-01-01 00:00:04"}),
            record("C", "2025-01-01 00:00:05"),
        ];

        let summary = download_batch(&downloader, &records, None).await;

        let urls: Vec<String> = engine.calls().into_iter().map(|c| c.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://vm.tiktok.com/A",
                "https://vm.tiktok.com/B",
                "https://vm.tiktok.com/C"
            ]
        );
        assert_eq!(summary.total_records, 6);
        assert_eq!(summary.valid, 3);
        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.invalid(), 3);
        assert!(summary.has_failures());
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(RecordingEngine::new().failing_on(2));
        let downloader = setup(engine.clone(), dir.path());

        let records = vec![
            record("A", "2025-01-01 00:00:01"),
            record("B", "2025-01-01 00:00:02"),
            record("C", "2025-01-01 00:00:03"),
        ];

        let summary = download_batch(&downloader, &records, None).await;

        assert_eq!(engine.calls().len(), 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert!(summary.has_failures());
    }

    #[tokio::test]
    async fn test_engine_panic_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(RecordingEngine::new().panicking_on(1));
        let downloader = setup(engine.clone(), dir.path());

        let records = vec![
            record("A", "2025-01-01 00:00:01"),
            record("B", "2025-01-01 00:00:02"),
        ];

        let summary = download_batch(&downloader, &records, None).await;

        assert_eq!(engine.calls().len(), 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.succeeded, 1);
    }

    #[tokio::test]
    async fn test_unsupported_links_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(RecordingEngine::new());
        let downloader = setup(engine.clone(), dir.path());

        let records = vec![
            json!({"Link": "https://example.com/video/1", "Date": "2025-01-01 00:00:01"}),
            record("A", "2025-01-01 00:00:02"),
        ];

        let summary = download_batch(&downloader, &records, None).await;

        assert_eq!(engine.calls().len(), 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.succeeded, 1);
    }

    #[tokio::test]
    async fn test_progress_updates() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = setup(Arc::new(RecordingEngine::new()), dir.path());
        let updates = Mutex::new(Vec::new());
        let observer = |u: &ProgressUpdate| updates.lock().unwrap().push(u.clone());

        let records = vec![
            record("A", "2025-01-01 00:00:01"),
            record("B", "2025-01-01 00:00:02"),
        ];
        download_batch(&downloader, &records, Some(&observer)).await;

        let updates = updates.into_inner().unwrap();
        let ticks: Vec<(usize, usize, f64)> =
            updates.iter().map(|u| (u.index, u.total, u.fraction)).collect();
        assert_eq!(
            ticks,
            vec![(0, 2, 0.5), (0, 2, 1.0), (1, 2, 0.5), (1, 2, 1.0), (2, 2, 1.0)]
        );
        assert_eq!(updates[0].message, "Downloading video 1 of 2");
        assert_eq!(updates[2].message, "Downloading video 2 of 2");
        assert_eq!(updates[4].message, "Download complete!");
    }

    #[tokio::test]
    async fn test_cancel_before_start() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(RecordingEngine::new());
        let downloader = setup(engine.clone(), dir.path());
        let cancel = CancelFlag::new();
        cancel.cancel();

        let records = vec![record("A", "2025-01-01 00:00:01")];
        let summary = download_batch_until(&downloader, &records, None, &cancel).await;

        assert!(engine.calls().is_empty());
        assert!(summary.cancelled);
        assert_eq!(summary.attempted(), 0);
    }

    #[tokio::test]
    async fn test_cancel_midway() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(RecordingEngine::new());
        let downloader = setup(engine.clone(), dir.path());
        let cancel = CancelFlag::new();

        let stopper = {
            let cancel = cancel.clone();
            move |u: &ProgressUpdate| {
                if u.index == 0 && u.fraction >= 1.0 {
                    cancel.cancel();
                }
            }
        };

        let records = vec![
            record("A", "2025-01-01 00:00:01"),
            record("B", "2025-01-01 00:00:02"),
        ];
        let summary = download_batch_until(&downloader, &records, Some(&stopper), &cancel).await;

        assert_eq!(engine.calls().len(), 1);
        assert_eq!(summary.succeeded, 1);
        assert!(summary.cancelled);
    }

    #[test]
    fn test_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(RecordingEngine::new());
        let downloader = setup(engine.clone(), dir.path());

        let summary = tokio_test::block_on(download_batch(&downloader, &[], None));
        assert_eq!(summary, BatchSummary::default());
        assert!(engine.calls().is_empty());
    }
}
