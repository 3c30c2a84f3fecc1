//! Batch progress reporting.

/// One progress tick for the whole batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Zero-based index of the video being downloaded.
    pub index: usize,
    /// Number of videos in the batch.
    pub total: usize,
    /// Completion of the current video, 0.0 to 1.0.
    pub fraction: f64,
    /// Status line, e.g. "Downloading video 2 of 5".
    pub message: String,
}

impl ProgressUpdate {
    /// Completion of the whole batch, 0.0 to 1.0.
    pub fn overall_fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        ((self.index as f64 + self.fraction) / self.total as f64).clamp(0.0, 1.0)
    }
}

/// Receives batch progress. Called on the task driving the batch.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, update: &ProgressUpdate);
}

impl<F> ProgressObserver for F
where
    F: Fn(&ProgressUpdate) + Send + Sync,
{
    fn on_progress(&self, update: &ProgressUpdate) {
        self(update)
    }
}
