//! TikTok link validation.

use std::sync::OnceLock;

use regex::Regex;

/// Canonical, short-link (`vm.`, `vt.`), CDN (`video-xx.`) and regional hosts,
/// each followed by a path.
const TIKTOK_URL_PATTERN: &str =
    r"^https?://((?:vm|vt|www|video-[a-z0-9]+)\.)?(?:tiktok|tiktokv)\.(?:com|us)/";

fn tiktok_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(TIKTOK_URL_PATTERN).expect("TikTok URL pattern is valid"))
}

/// Check whether `url` points at a TikTok host the fetch engine can handle.
pub fn is_supported_url(url: &str) -> bool {
    tiktok_pattern().is_match(url)
}
