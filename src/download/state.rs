//! Batch statistics.

use crate::download::item::DownloadOutcome;

/// Counters for one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records found in the export list.
    pub total_records: usize,
    /// Records with both a link and a date.
    pub valid: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Rejected before fetching (unsupported URL).
    pub skipped: usize,
    /// The batch stopped before processing every valid record.
    pub cancelled: bool,
}

impl BatchSummary {
    pub fn new(total_records: usize, valid: usize) -> Self {
        Self {
            total_records,
            valid,
            ..Default::default()
        }
    }

    /// Count one download outcome.
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Downloaded(_) => self.succeeded += 1,
            DownloadOutcome::Skipped { .. } => self.skipped += 1,
            DownloadOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Number of valid records handed to the downloader.
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }

    /// Records dropped for missing a link or date.
    pub fn invalid(&self) -> usize {
        self.total_records.saturating_sub(self.valid)
    }

    /// Whether any listed video did not end up on disk, including records
    /// dropped for missing a link or date.
    pub fn has_failures(&self) -> bool {
        self.failed + self.skipped + self.invalid() > 0
    }
}
