//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::config::Category;
use crate::error::Result;

/// Get the output folder for a category under the output root.
pub fn get_category_folder(output_root: &Path, category: Category) -> PathBuf {
    output_root.join(category.folder_name())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_category_folder() {
        let root = PathBuf::from("/downloads");
        assert_eq!(
            get_category_folder(&root, Category::Favorites),
            PathBuf::from("/downloads/favorites")
        );
        assert_eq!(
            get_category_folder(&root, Category::MyVideos),
            PathBuf::from("/downloads/my-videos")
        );
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("favorites");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Second call is a no-op
        ensure_dir(&nested).unwrap();
    }
}
