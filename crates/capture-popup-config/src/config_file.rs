use std::path::PathBuf;

const CONFIG_FILE: &str = ".capture-popup.toml";

/// Load config file content from CWD first, then the user config directory
///
/// Searches for the config in:
/// 1. Current working directory as .capture-popup.toml
/// 2. Config directory as capture-popup/config.toml
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    if let Some(path) = user_config_path() {
        if let Ok(content) = std::fs::read_to_string(&path) {
            log::debug!("Loaded config from {}", path.display());
            return Some(content);
        }
    }

    None
}

/// Path of the per-user config file, if the config directory is known
fn user_config_path() -> Option<PathBuf> {
    crate::paths::app_config_path().ok()
}
