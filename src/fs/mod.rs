//! Filesystem module.
//!
//! Provides:
//! - Output directory management
//! - Filename generation

pub mod naming;
pub mod paths;

pub use naming::{filename_for, FALLBACK_PREFIX, VIDEO_EXTENSION};
pub use paths::{ensure_dir, get_category_folder};
