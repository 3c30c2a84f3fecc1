//! Fetch engine capability.
//!
//! The downloader never talks to TikTok itself. It hands a URL, a destination
//! path and [`FetchOptions`] to a [`FetchEngine`] and listens to the
//! [`FetchEvent`]s it emits. [`YtDlpEngine`] is the production engine.

pub mod types;
pub mod ytdlp;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

pub use types::{default_headers, FetchEvent, FetchOptions, TIKTOK_WEB_ROOT};
pub use ytdlp::{find_ytdlp, YtDlpEngine};

/// Something that can fetch one video URL to a file.
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// Short engine name used in log lines.
    fn name(&self) -> &str;

    /// Fetch `url` into `destination`, reporting progress through `on_event`.
    ///
    /// Events are delivered synchronously, on the task driving the fetch.
    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        options: &FetchOptions,
        on_event: &(dyn Fn(FetchEvent) + Send + Sync),
    ) -> Result<()>;
}
