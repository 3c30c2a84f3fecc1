//! Progress bar rendering.

use std::io::{self, Write};

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing_subscriber::fmt::MakeWriter;

use crate::download::{ProgressObserver, ProgressUpdate};

/// Bar resolution, in steps per bar.
const BAR_STEPS: u64 = 1000;

/// Two-bar console display: whole batch and current video.
pub struct ConsoleProgress {
    _multi: MultiProgress,
    overall: ProgressBar,
    current: ProgressBar,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::with_multi(MultiProgress::new())
    }

    /// Draw the bars through an existing `MultiProgress`, e.g. the one shared
    /// with [`ProgressLogWriter`].
    pub fn with_multi(multi: MultiProgress) -> Self {
        let overall = multi.add(create_bar("Overall      ", "{msg}"));
        let current = multi.add(create_bar("Current video", "{percent}%"));

        Self {
            _multi: multi,
            overall,
            current,
        }
    }

    /// Leave the bars on screen in their final state.
    pub fn finish(&self) {
        self.current.finish();
        self.overall.finish();
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for ConsoleProgress {
    fn on_progress(&self, update: &ProgressUpdate) {
        self.overall
            .set_position(to_steps(update.overall_fraction()));
        self.overall.set_message(update.message.clone());
        self.current.set_position(to_steps(update.fraction));
    }
}

/// Log sink for `tracing-subscriber` that hides the bars while a log line is
/// written to stderr, so log output and bars do not tear each other.
#[derive(Clone)]
pub struct ProgressLogWriter {
    multi: MultiProgress,
}

impl ProgressLogWriter {
    pub fn new(multi: MultiProgress) -> Self {
        Self { multi }
    }
}

impl<'a> MakeWriter<'a> for ProgressLogWriter {
    type Writer = SuspendingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendingWriter {
            multi: self.multi.clone(),
            buf: Vec::new(),
        }
    }
}

/// Buffers one log event and writes it out with the bars suspended.
pub struct SuspendingWriter {
    multi: MultiProgress,
    buf: Vec<u8>,
}

impl Write for SuspendingWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let buf = std::mem::take(&mut self.buf);
        self.multi.suspend(|| {
            let mut stderr = io::stderr().lock();
            stderr.write_all(&buf)?;
            stderr.flush()
        })
    }
}

impl Drop for SuspendingWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

fn to_steps(fraction: f64) -> u64 {
    (fraction.clamp(0.0, 1.0) * BAR_STEPS as f64).round() as u64
}

/// Create a progress bar with a fixed label.
fn create_bar(label: &str, suffix: &str) -> ProgressBar {
    let bar = ProgressBar::new(BAR_STEPS);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} {} [{{bar:40.cyan/blue}}] {}",
                label, suffix
            ))
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}
