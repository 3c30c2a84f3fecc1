//! Filename generation.

use chrono::{Local, NaiveDateTime};

/// Timestamp layout used in the export's `Date` field.
const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Extension of every downloaded video.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Prefix marking names generated from the wall clock instead of the export date.
pub const FALLBACK_PREFIX: &str = "tiktok_";

/// Generate the output filename for a record date.
///
/// `"2025-01-14 04:36:07"` becomes `"20250114T043607.mp4"`. Dates that do not
/// parse fall back to `tiktok_<now>.mp4` at second resolution.
pub fn filename_for(date: &str) -> String {
    match NaiveDateTime::parse_from_str(date, EXPORT_DATE_FORMAT) {
        Ok(parsed) => format!("{}.{}", parsed.format("%Y%m%dT%H%M%S"), VIDEO_EXTENSION),
        Err(e) => {
            tracing::debug!("Unparseable date {:?} ({}), using current time", date, e);
            fallback_filename()
        }
    }
}

fn fallback_filename() -> String {
    format!(
        "{}{}.{}",
        FALLBACK_PREFIX,
        Local::now().format("%Y%m%d_%H%M%S"),
        VIDEO_EXTENSION
    )
}
