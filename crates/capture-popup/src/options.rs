//! Options service backed by the popup config file

use async_trait::async_trait;
use capture_host::OptionsService;
use capture_popup_config::PopupConfig;
use std::collections::BTreeMap;

/// Serves toolbar options from a [`PopupConfig`]
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    config: PopupConfig,
}

impl ConfigOptions {
    pub fn new(config: PopupConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl OptionsService for ConfigOptions {
    async fn toolbar_visibility(&self) -> anyhow::Result<BTreeMap<String, bool>> {
        Ok(self.config.toolbar_visibility())
    }

    async fn has_server(&self) -> anyhow::Result<bool> {
        Ok(self.config.has_server())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_config_values() {
        let config = PopupConfig::parse(
            r#"
            server_url = "http://localhost:8080"

            [toolbar]
            BatchCapture = false
            "#,
        )
        .unwrap();
        let options = ConfigOptions::new(config);

        assert!(options.has_server().await.unwrap());
        let visibility = options.toolbar_visibility().await.unwrap();
        assert_eq!(visibility.get("ui.toolbar.showBatchCapture"), Some(&false));
        assert_eq!(visibility.get("ui.toolbar.showCaptureTab"), Some(&true));
    }
}
