//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Category, Config};

/// TikTok export downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "tiktok-export-dl",
    version,
    about = "Download videos from TikTok metadata",
    long_about = "Download the videos listed in a TikTok data export (user_data.json).\n\n\
                  Supports your favorite videos and the videos you posted."
)]
pub struct Args {
    /// Path to the metadata JSON file.
    pub metadata_file: PathBuf,

    /// Base directory to save downloaded videos.
    pub download_dir: PathBuf,

    /// Type of videos to download.
    #[arg(long = "type", value_enum)]
    pub video_type: Option<CategoryArg>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "tiktok-dl.toml")]
    pub config: PathBuf,

    /// Path to the yt-dlp binary.
    #[arg(long = "ytdlp-path", env = "TIKTOK_DL_YTDLP")]
    pub ytdlp_path: Option<PathBuf>,

    /// Hide progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI video type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Videos you marked as favorite.
    Favorites,
    /// Videos you posted.
    #[value(alias = "own-items")]
    MyVideos,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Favorites => Category::Favorites,
            CategoryArg::MyVideos => Category::MyVideos,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(video_type) = self.video_type {
            config.options.category = video_type.into();
        }

        if let Some(path) = &self.ytdlp_path {
            config.engine.ytdlp_path = Some(path.clone());
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}
