//! Configuration and file management for the capture popup
//!
//! This crate provides:
//! - File path utilities for config and cache files
//! - Configuration file loading (TOML)
//! - Popup configuration (PopupConfig)

pub mod config_file;
pub mod paths;
pub mod popup_config;

pub use config_file::load_config_file;
pub use paths::{cache_dir, config_dir};
pub use popup_config::{PopupConfig, TOOLBAR_OPTION_PREFIX};
