//! Run entry point: export file in, videos out.

use std::path::Path;
use std::sync::Arc;

use crate::config::Category;
use crate::download::batch::{download_batch_until, CancelFlag};
use crate::download::item::ItemDownloader;
use crate::download::progress::ProgressObserver;
use crate::download::state::BatchSummary;
use crate::engine::{FetchEngine, FetchOptions, YtDlpEngine};
use crate::error::Result;
use crate::fs::get_category_folder;
use crate::media::{extract_records, load_document};

/// Runs one export download with a given engine.
pub struct Runner {
    engine: Arc<dyn FetchEngine>,
    options: FetchOptions,
    cancel: CancelFlag,
}

impl Runner {
    pub fn new(engine: Arc<dyn FetchEngine>) -> Self {
        Self {
            engine,
            options: FetchOptions::default(),
            cancel: CancelFlag::default(),
        }
    }

    /// Use `options` for every fetch.
    pub fn with_fetch_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Stop between videos once `cancel` is set.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Download every `category` video listed in the export at `metadata_path`
    /// into `output_root/<category>`.
    ///
    /// Unreadable or malformed metadata is an error; individual video
    /// failures are only counted in the summary.
    pub async fn run(
        &self,
        metadata_path: &Path,
        output_root: &Path,
        category: Category,
        observer: Option<&dyn ProgressObserver>,
    ) -> Result<BatchSummary> {
        let save_dir = get_category_folder(output_root, category);
        let downloader = ItemDownloader::new(self.engine.clone(), save_dir, self.options.clone())?;

        let document = load_document(metadata_path)?;
        let records = extract_records(&document, category);
        tracing::debug!(
            "{} {} entries in {}",
            records.len(),
            category,
            metadata_path.display()
        );

        Ok(download_batch_until(&downloader, records, observer, &self.cancel).await)
    }
}

/// Download an export with the system yt-dlp and default options.
///
/// `category` is `favorites` or `my-videos`; anything else fails before any
/// file is touched.
pub async fn run(
    metadata_path: &Path,
    output_root: &Path,
    category: &str,
    observer: Option<&dyn ProgressObserver>,
) -> Result<BatchSummary> {
    let category: Category = category.parse()?;
    let engine = YtDlpEngine::locate(None)?;

    Runner::new(Arc::new(engine))
        .run(metadata_path, output_root, category, observer)
        .await
}
