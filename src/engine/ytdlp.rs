//! yt-dlp backed fetch engine.
//!
//! yt-dlp is spawned once per video. Progress is read from stdout using a
//! machine-readable `--progress-template`, stderr is kept for error reporting.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::engine::types::{FetchEvent, FetchOptions};
use crate::engine::FetchEngine;
use crate::error::{Error, Result};

/// Marker prefixed to every progress line we ask yt-dlp to print.
const PROGRESS_MARKER: &str = "ttdl|";

/// Fields are status, percent, speed and ETA.
const PROGRESS_TEMPLATE: &str = "download:ttdl|%(progress.status)s|%(progress._percent_str)s|%(progress._speed_str)s|%(progress._eta_str)s";

/// Fetch engine driving an installed yt-dlp binary.
#[derive(Debug, Clone)]
pub struct YtDlpEngine {
    ytdlp_path: PathBuf,
}

impl YtDlpEngine {
    /// Use the yt-dlp binary at `ytdlp_path`.
    pub fn new(ytdlp_path: PathBuf) -> Self {
        Self { ytdlp_path }
    }

    /// Use `explicit` when given, otherwise search for yt-dlp.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        let ytdlp_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => find_ytdlp().ok_or(Error::YtDlpNotFound)?,
        };

        tracing::debug!("Using yt-dlp at {}", ytdlp_path.display());
        Ok(Self::new(ytdlp_path))
    }

    /// Get the path to yt-dlp being used.
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }
}

#[async_trait]
impl FetchEngine for YtDlpEngine {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        options: &FetchOptions,
        on_event: &(dyn Fn(FetchEvent) + Send + Sync),
    ) -> Result<()> {
        let args = build_args(url, destination, options);

        let mut child = Command::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::YtDlpNotFound
                } else {
                    Error::Fetch(format!("Failed to start yt-dlp: {}", e))
                }
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Fetch("yt-dlp stdout not captured".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Fetch("yt-dlp stderr not captured".into()))?;

        let mut saw_finished = false;

        // Output is not guaranteed to be UTF-8 (titles, localized messages).
        let read_progress = async {
            let mut lines = BufReader::new(stdout).split(b'\n');
            while let Some(raw) = lines.next_segment().await? {
                let line = String::from_utf8_lossy(&raw);
                match parse_progress_line(&line) {
                    Some(event) => {
                        saw_finished |= event == FetchEvent::Finished;
                        on_event(event);
                    }
                    None => tracing::trace!("yt-dlp: {}", line),
                }
            }
            Ok::<(), std::io::Error>(())
        };

        let read_errors = async {
            let mut collected = String::new();
            let mut lines = BufReader::new(stderr).split(b'\n');
            while let Ok(Some(raw)) = lines.next_segment().await {
                collected.push_str(&String::from_utf8_lossy(&raw));
                collected.push('\n');
            }
            collected
        };

        let (progress_result, stderr_text) = tokio::join!(read_progress, read_errors);
        progress_result?;

        let status = child.wait().await?;
        if !status.success() {
            return Err(Error::Fetch(format!(
                "yt-dlp exited with {}: {}",
                status,
                error_summary(&stderr_text)
            )));
        }

        if !saw_finished {
            on_event(FetchEvent::Finished);
        }

        Ok(())
    }
}

/// Build the yt-dlp command line for one download.
pub fn build_args(url: &str, destination: &Path, options: &FetchOptions) -> Vec<String> {
    let mut args = vec!["-f".to_string(), options.format.clone()];

    if options.no_playlist {
        args.push("--no-playlist".to_string());
    }

    args.extend([
        "--newline".to_string(),
        "--progress-template".to_string(),
        PROGRESS_TEMPLATE.to_string(),
    ]);

    for (name, value) in &options.headers {
        args.push("--add-header".to_string());
        args.push(format!("{}:{}", name, value));
    }

    for extractor_arg in &options.extractor_args {
        args.push("--extractor-args".to_string());
        args.push(extractor_arg.clone());
    }

    args.push("-o".to_string());
    args.push(escape_output_template(destination));

    args.push("--".to_string());
    args.push(url.to_string());
    args
}

/// yt-dlp treats `-o` as a template, so literal `%` must be doubled.
fn escape_output_template(path: &Path) -> String {
    path.to_string_lossy().replace('%', "%%")
}

fn ansi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("ANSI pattern is valid"))
}

fn percent_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)%").expect("percent pattern is valid"))
}

fn clean_field(field: &str) -> String {
    ansi_pattern().replace_all(field, "").trim().to_string()
}

/// Parse one line of yt-dlp stdout into a progress event.
pub fn parse_progress_line(line: &str) -> Option<FetchEvent> {
    let rest = line.trim().strip_prefix(PROGRESS_MARKER)?;
    let mut fields = rest.splitn(4, '|');

    let status = clean_field(fields.next()?);
    match status.as_str() {
        "finished" => Some(FetchEvent::Finished),
        "downloading" => {
            let percent_str = clean_field(fields.next().unwrap_or(""));
            let percent = percent_pattern()
                .captures(&percent_str)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok());

            Some(FetchEvent::Downloading {
                percent,
                speed: clean_field(fields.next().unwrap_or("N/A")),
                eta: clean_field(fields.next().unwrap_or("N/A")),
            })
        }
        _ => None,
    }
}

/// Pick the most useful line of yt-dlp's stderr.
fn error_summary(stderr: &str) -> String {
    let mut lines = stderr.lines().map(str::trim).filter(|l| !l.is_empty());
    let last_error = stderr
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("ERROR:"))
        .last();

    match last_error.or_else(|| lines.next_back()) {
        Some(line) => line.to_string(),
        None => "no error output".to_string(),
    }
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find yt-dlp on PATH, then in common installation paths.
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Ok(path) = which::which("yt-dlp") {
        return Some(path);
    }

    find_in_common_paths()
}

fn find_in_common_paths() -> Option<PathBuf> {
    let mut candidates = vec![
        PathBuf::from("/opt/homebrew/bin/yt-dlp"),
        PathBuf::from("/usr/local/bin/yt-dlp"),
        PathBuf::from("/usr/bin/yt-dlp"),
    ];

    if let Some(base) = directories::BaseDirs::new() {
        candidates.push(base.home_dir().join(".local").join("bin").join("yt-dlp"));
    }

    candidates.into_iter().find(|p| is_executable(p))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
