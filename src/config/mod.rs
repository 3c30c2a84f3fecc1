//! Configuration module for tiktok-export-dl.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Video category selection
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, EngineConfig, OptionsConfig};
pub use modes::Category;
pub use validation::validate_config;
