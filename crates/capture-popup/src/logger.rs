//! File-based logging using simplelog
//!
//! Log file location depends on build type:
//! - Debug builds: current working directory (for development convenience)
//! - Release builds: cache directory (~/.cache/capture-popup/ on Linux)

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

/// Get the log file path based on build type
fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!("capture-popup-{}.log", timestamp);

    if cfg!(debug_assertions) {
        PathBuf::from(filename)
    } else {
        capture_popup_config::cache_dir()
            .map(|dir| dir.join(&filename))
            .unwrap_or_else(|_| PathBuf::from(filename))
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Pick the level: RUST_LOG first, then the configured level, else Debug
fn resolve_level(env_level: Option<&str>, configured: Option<&str>) -> LevelFilter {
    env_level
        .and_then(parse_level)
        .or_else(|| configured.and_then(parse_level))
        .unwrap_or(LevelFilter::Debug)
}

/// Initialize file-based logging
///
/// Creates a log file with timestamp and returns its path. Until
/// [`apply_configured_level`] runs, only `RUST_LOG` decides the level, so
/// config loading itself can be logged.
pub fn init() -> Result<PathBuf> {
    let log_file = log_file_path();

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    // The logger passes everything; the max level does the filtering
    WriteLogger::init(LevelFilter::Trace, config, file).context("Failed to initialize logger")?;
    set_level(std::env::var("RUST_LOG").ok().as_deref(), None);

    Ok(log_file)
}

/// Apply the level from the config file unless RUST_LOG overrides it
pub fn apply_configured_level(configured: Option<&str>) -> LevelFilter {
    set_level(std::env::var("RUST_LOG").ok().as_deref(), configured)
}

fn set_level(env_level: Option<&str>, configured: Option<&str>) -> LevelFilter {
    let level = resolve_level(env_level, configured);
    log::set_max_level(level);
    level
}
