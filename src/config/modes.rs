//! Video category definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Which record collection of the export to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Videos the user marked as favorite (default).
    #[default]
    Favorites,
    /// Videos the user posted.
    #[serde(alias = "own-items")]
    MyVideos,
}

impl Category {
    /// Get the output subfolder name for this category.
    pub fn folder_name(&self) -> &'static str {
        match self {
            Category::Favorites => "favorites",
            Category::MyVideos => "my-videos",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Favorites => write!(f, "favorites"),
            Category::MyVideos => write!(f, "my-videos"),
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "favorites" => Ok(Category::Favorites),
            "my-videos" | "own-items" => Ok(Category::MyVideos),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}
