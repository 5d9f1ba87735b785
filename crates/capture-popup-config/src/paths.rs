//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/capture-popup/`, `~/.cache/capture-popup/`
//! - macOS: `~/Library/Application Support/capture-popup/`, `~/Library/Caches/capture-popup/`
//! - Windows: `%APPDATA%\capture-popup\`, `%LOCALAPPDATA%\capture-popup\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "capture-popup";

/// Get the application config directory
/// Returns ~/.config/capture-popup/ on Linux, ~/Library/Application Support/capture-popup/ on macOS
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the application cache directory
/// Returns ~/.cache/capture-popup/ on Linux, ~/Library/Caches/capture-popup/ on macOS
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get path to the per-user config file
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
