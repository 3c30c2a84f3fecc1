//! Fetch engine request and event types.

/// Root of the TikTok website, sent as the Referer.
pub const TIKTOK_WEB_ROOT: &str = "https://www.tiktok.com/";

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Progress event emitted by a fetch engine while it works on one URL.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    /// Transfer in progress.
    Downloading {
        /// Completion in percent (0-100), when the engine reports one.
        percent: Option<f64>,
        /// Human-readable transfer rate.
        speed: String,
        /// Human-readable time remaining.
        eta: String,
    },
    /// Transfer complete.
    Finished,
}

impl FetchEvent {
    /// Completion percentage carried by this event.
    pub fn percent(&self) -> Option<f64> {
        match self {
            FetchEvent::Downloading { percent, .. } => percent.map(|p| p.clamp(0.0, 100.0)),
            FetchEvent::Finished => Some(100.0),
        }
    }
}

/// Options for a single fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    /// Format selector, `best` picks the best single-file quality.
    pub format: String,

    /// Never expand a URL into a playlist.
    pub no_playlist: bool,

    /// HTTP headers sent with every request, in order.
    pub headers: Vec<(String, String)>,

    /// Extractor-specific arguments (`extractor:key=value`).
    pub extractor_args: Vec<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            format: "best".to_string(),
            no_playlist: true,
            headers: default_headers(
                &crate::config::loader::default_user_agent(),
                &crate::config::loader::default_accept_language(),
            ),
            extractor_args: crate::config::loader::default_extractor_args(),
        }
    }
}

/// Browser-like header set so TikTok treats the engine as a regular visitor.
pub fn default_headers(user_agent: &str, accept_language: &str) -> Vec<(String, String)> {
    [
        ("User-Agent", user_agent),
        ("Accept", ACCEPT),
        ("Accept-Language", accept_language),
        ("Referer", TIKTOK_WEB_ROOT),
        ("Sec-Fetch-Dest", "document"),
        ("Sec-Fetch-Mode", "navigate"),
        ("Sec-Fetch-Site", "none"),
        ("Sec-Fetch-User", "?1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = FetchOptions::default();
        assert_eq!(options.format, "best");
        assert!(options.no_playlist);
        assert_eq!(options.headers.len(), 8);
    }

    #[test]
    fn test_default_headers() {
        let headers = default_headers("UA", "de-DE");
        let get = |name: &str| {
            headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("User-Agent"), Some("UA"));
        assert_eq!(get("Accept-Language"), Some("de-DE"));
        assert_eq!(get("Referer"), Some("https://www.tiktok.com/"));
        assert_eq!(get("Sec-Fetch-User"), Some("?1"));
    }

    #[test]
    fn test_event_percent() {
        let event = FetchEvent::Downloading {
            percent: Some(42.5),
            speed: "1.2MiB/s".into(),
            eta: "00:03".into(),
        };
        assert_eq!(event.percent(), Some(42.5));
        assert_eq!(FetchEvent::Finished.percent(), Some(100.0));

        let unknown = FetchEvent::Downloading {
            percent: None,
            speed: "N/A".into(),
            eta: "N/A".into(),
        };
        assert_eq!(unknown.percent(), None);
    }
}
