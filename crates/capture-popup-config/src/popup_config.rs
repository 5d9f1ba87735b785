//! Popup configuration
//!
//! Configuration loaded from .capture-popup.toml (or the user config dir).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix shared by every toolbar visibility option key
pub const TOOLBAR_OPTION_PREFIX: &str = "ui.toolbar.show";

/// Toolbar options known to the popup, all shown unless configured otherwise
const DEFAULT_TOOLBAR_OPTIONS: &[&str] = &[
    "ui.toolbar.showCaptureTab",
    "ui.toolbar.showCaptureTabSource",
    "ui.toolbar.showCaptureTabBookmark",
    "ui.toolbar.showCaptureTabAs",
    "ui.toolbar.showBatchCapture",
    "ui.toolbar.showBatchCaptureLinks",
    "ui.toolbar.showEditTab",
    "ui.toolbar.showSearchCaptures",
    "ui.toolbar.showOpenScrapBook",
];

/// Popup configuration loaded from the TOML config file
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PopupConfig {
    /// Toolbar visibility overrides
    ///
    /// Keys may be written in full (`"ui.toolbar.showEditTab"`) or
    /// without the prefix (`EditTab` / `showEditTab`).
    #[serde(default)]
    pub toolbar: BTreeMap<String, bool>,

    /// Backend server address; search and library controls need one
    #[serde(default)]
    pub server_url: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[serde(default)]
    pub log_level: Option<String>,
}

impl PopupConfig {
    /// Load config from CWD first, then the user config directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded popup config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default popup config");
        Self::default()
    }

    /// Parse config from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Full toolbar visibility mapping: defaults overlaid with configured values
    ///
    /// Every key in the result carries the `ui.toolbar.show` prefix.
    pub fn toolbar_visibility(&self) -> BTreeMap<String, bool> {
        let mut visibility: BTreeMap<String, bool> = DEFAULT_TOOLBAR_OPTIONS
            .iter()
            .map(|key| (key.to_string(), true))
            .collect();

        for (key, shown) in &self.toolbar {
            visibility.insert(normalize_option_key(key), *shown);
        }

        visibility
    }

    /// Whether a backend server is configured
    pub fn has_server(&self) -> bool {
        self.server_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

/// Expand a short toolbar key to its full option name
fn normalize_option_key(key: &str) -> String {
    if key.starts_with(TOOLBAR_OPTION_PREFIX) {
        return key.to_string();
    }

    let name = key.strip_prefix("show").unwrap_or(key);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!(
            "{}{}{}",
            TOOLBAR_OPTION_PREFIX,
            first.to_ascii_uppercase(),
            chars.as_str()
        ),
        None => TOOLBAR_OPTION_PREFIX.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PopupConfig::default();
        assert!(!config.has_server());
        assert!(config.log_level.is_none());

        let visibility = config.toolbar_visibility();
        assert_eq!(visibility.len(), DEFAULT_TOOLBAR_OPTIONS.len());
        assert!(visibility.values().all(|shown| *shown));
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            server_url = "http://localhost:8080"
            log_level = "debug"

            [toolbar]
            "ui.toolbar.showBatchCapture" = false
        "#;
        let config = PopupConfig::parse(toml).unwrap();
        assert!(config.has_server());
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(
            config.toolbar_visibility().get("ui.toolbar.showBatchCapture"),
            Some(&false)
        );
    }

    #[test]
    fn test_short_toolbar_keys_are_expanded() {
        let toml = r#"
            [toolbar]
            EditTab = false
            showSearchCaptures = false
            captureTabAs = false
        "#;
        let visibility = PopupConfig::parse(toml).unwrap().toolbar_visibility();
        assert_eq!(visibility.get("ui.toolbar.showEditTab"), Some(&false));
        assert_eq!(visibility.get("ui.toolbar.showSearchCaptures"), Some(&false));
        assert_eq!(visibility.get("ui.toolbar.showCaptureTabAs"), Some(&false));
        assert_eq!(visibility.get("ui.toolbar.showCaptureTab"), Some(&true));
    }

    #[test]
    fn test_blank_server_url_is_not_a_server() {
        let config = PopupConfig::parse(r#"server_url = "  ""#).unwrap();
        assert!(!config.has_server());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(PopupConfig::parse("toolbar = 3").is_err());
    }
}
