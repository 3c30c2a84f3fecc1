//! Metadata document loading and record extraction.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::Category;
use crate::error::{Error, Result};

/// Path to the user's favorite videos.
const FAVORITES_PATH: [&str; 3] = ["Activity", "Favorite Videos", "FavoriteVideoList"];

/// Path to the videos the user posted.
const MY_VIDEOS_PATH: [&str; 3] = ["Video", "Videos", "VideoList"];

/// Load and parse the export's JSON document.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Metadata(format!("{}: {}", path.display(), e)))?;

    let document: Value = serde_json::from_str(&content)?;
    Ok(document)
}

/// Walk `path` through nested objects and return the list found at its end.
///
/// Any missing segment, or a value of the wrong shape, yields an empty slice.
pub fn lookup_list<'a>(document: &'a Value, path: &[&str]) -> &'a [Value] {
    let mut current = document;
    for segment in path {
        match current.get(*segment) {
            Some(next) => current = next,
            None => return &[],
        }
    }

    current.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Extract the favorite video records.
pub fn extract_favorites(document: &Value) -> &[Value] {
    lookup_list(document, &FAVORITES_PATH)
}

/// Extract the user's own video records.
pub fn extract_own_items(document: &Value) -> &[Value] {
    lookup_list(document, &MY_VIDEOS_PATH)
}

/// Extract the records for a category.
pub fn extract_records(document: &Value, category: Category) -> &[Value] {
    match category {
        Category::Favorites => extract_favorites(document),
        Category::MyVideos => extract_own_items(document),
    }
}
