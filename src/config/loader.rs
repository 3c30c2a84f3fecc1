//! Configuration structures and loading logic.

use crate::config::modes::Category;
use crate::engine::{default_headers, FetchOptions};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

/// Run options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Which video list to download (favorites, my-videos).
    #[serde(default)]
    pub category: Category,

    /// Whether to show progress bars.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            category: Category::default(),
            show_progress: true,
        }
    }
}

/// Fetch engine (yt-dlp) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Explicit path to the yt-dlp binary. Looked up on PATH when unset.
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,

    /// yt-dlp format selector.
    #[serde(default = "default_format")]
    pub format: String,

    /// Browser user agent string sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Value of the Accept-Language header.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Extra `--extractor-args` values passed to yt-dlp.
    #[serde(default = "default_extractor_args")]
    pub extractor_args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            format: default_format(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            extractor_args: default_extractor_args(),
        }
    }
}

impl EngineConfig {
    /// Build the fetch options handed to the engine for every item.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            format: self.format.clone(),
            no_playlist: true,
            headers: default_headers(&self.user_agent, &self.accept_language),
            extractor_args: self.extractor_args.clone(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> String {
    "best".to_string()
}

pub(crate) fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

pub(crate) fn default_accept_language() -> String {
    "en-US,en;q=0.5".to_string()
}

pub(crate) fn default_extractor_args() -> Vec<String> {
    vec!["tiktok:webpage_download=True".to_string()]
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.options.category, Category::Favorites);
        assert!(config.options.show_progress);
        assert_eq!(config.engine.format, "best");
        assert!(config.engine.ytdlp_path.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[options]\ncategory = \"own-items\"\n\n[engine]\nformat = \"best[height<=720]\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.options.category, Category::MyVideos);
        assert_eq!(config.engine.format, "best[height<=720]");
        assert_eq!(config.engine.user_agent, default_user_agent());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[options\ncategory = ").unwrap();
        assert!(matches!(
            Config::load(file.path()).unwrap_err(),
            Error::TomlParse(_)
        ));
    }

    #[test]
    fn test_fetch_options_from_engine_config() {
        let mut engine = EngineConfig::default();
        engine.user_agent = "CustomAgent/1.0 (compatible; export downloader test)".into();
        let options = engine.fetch_options();

        assert_eq!(options.format, "best");
        assert!(options.no_playlist);
        assert!(options
            .headers
            .iter()
            .any(|(k, v)| k == "User-Agent" && v.starts_with("CustomAgent")));
    }
}
