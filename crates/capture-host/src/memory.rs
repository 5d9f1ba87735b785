//! In-memory host
//!
//! Host implementations backed by plain data. Used by the dry-run binary
//! and by tests; they also record what was asked of them so callers can
//! check which paths a resolution took.

use crate::services::{CaptureService, OptionsService, PermissionService, TabQuery};
use crate::types::{Tab, TabId, Task};
use crate::url::is_content_capable_url;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Browser state served by [`MemoryBrowser`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserSnapshot {
    /// All tabs of the window, in browser order
    #[serde(default)]
    pub tabs: Vec<Tab>,

    /// Ids of highlighted tabs, in browser order
    #[serde(default)]
    pub highlighted: Vec<TabId>,

    /// Tab hosting the popup page; `None` when the popup is a prompt
    #[serde(default)]
    pub current_tab: Option<TabId>,

    /// Active tab of the current window
    #[serde(default)]
    pub active_tab: Option<TabId>,

    /// Whether file URLs may be captured
    #[serde(default)]
    pub allow_file_access: bool,
}

/// Tab query and permission host over a [`BrowserSnapshot`]
#[derive(Debug, Default)]
pub struct MemoryBrowser {
    snapshot: BrowserSnapshot,
    failure: Option<String>,
    queries: Mutex<Vec<&'static str>>,
    activated: Mutex<Vec<TabId>>,
}

impl MemoryBrowser {
    pub fn new(snapshot: BrowserSnapshot) -> Self {
        Self {
            snapshot,
            ..Default::default()
        }
    }

    /// A browser whose every query fails with `message`
    pub fn failing(snapshot: BrowserSnapshot, message: impl Into<String>) -> Self {
        Self {
            snapshot,
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Names of the queries made so far, in call order
    pub fn queries(&self) -> Vec<&'static str> {
        lock(&self.queries).clone()
    }

    /// Tabs activated through [`TabQuery::activate_tab`]
    pub fn activated(&self) -> Vec<TabId> {
        lock(&self.activated).clone()
    }

    fn record(&self, query: &'static str) -> anyhow::Result<()> {
        lock(&self.queries).push(query);
        match &self.failure {
            Some(message) => Err(anyhow::anyhow!("{}: {}", query, message)),
            None => Ok(()),
        }
    }

    fn find(&self, id: Option<TabId>) -> Option<Tab> {
        let id = id?;
        self.snapshot.tabs.iter().find(|tab| tab.id == id).cloned()
    }

    fn is_content(&self, tab: &Tab) -> bool {
        is_content_capable_url(&tab.url, self.snapshot.allow_file_access)
    }
}

#[async_trait]
impl TabQuery for MemoryBrowser {
    async fn current_tab(&self) -> anyhow::Result<Option<Tab>> {
        self.record("current_tab")?;
        Ok(self.find(self.snapshot.current_tab))
    }

    async fn active_tab(&self) -> anyhow::Result<Option<Tab>> {
        self.record("active_tab")?;
        Ok(self.find(self.snapshot.active_tab))
    }

    async fn list_content_tabs(&self) -> anyhow::Result<Vec<Tab>> {
        self.record("list_content_tabs")?;
        Ok(self
            .snapshot
            .tabs
            .iter()
            .filter(|tab| self.is_content(tab))
            .cloned()
            .collect())
    }

    async fn list_highlighted_tabs(&self) -> anyhow::Result<Vec<Tab>> {
        self.record("list_highlighted_tabs")?;
        Ok(self
            .snapshot
            .highlighted
            .iter()
            .filter_map(|id| self.find(Some(*id)))
            .filter(|tab| self.is_content(tab))
            .collect())
    }

    async fn activate_tab(&self, tab_id: TabId) -> anyhow::Result<()> {
        self.record("activate_tab")?;
        lock(&self.activated).push(tab_id);
        Ok(())
    }
}

#[async_trait]
impl PermissionService for MemoryBrowser {
    async fn is_file_access_allowed(&self) -> anyhow::Result<bool> {
        self.record("is_file_access_allowed")?;
        Ok(self.snapshot.allow_file_access)
    }
}

/// A call received by [`RecordingCaptureService`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum CaptureCall {
    DirectCapture { task: Task },
    CaptureWithOptions { task: Task },
    BatchCapture { task: Task },
    BatchCaptureFromLinks { task: Task },
    #[serde(rename_all = "camelCase")]
    EditTab { tab_id: TabId, force: bool },
    #[serde(rename_all = "camelCase")]
    SearchCaptures { tabs: Vec<TabId>, new_tab: bool },
    #[serde(rename_all = "camelCase")]
    OpenLibrary { new_tab: bool },
}

/// Capture service that records calls instead of capturing
#[derive(Debug, Default)]
pub struct RecordingCaptureService {
    calls: Mutex<Vec<CaptureCall>>,
    failure: Option<String>,
}

impl RecordingCaptureService {
    /// A service that rejects every call with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<CaptureCall> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: CaptureCall) -> anyhow::Result<()> {
        if let Some(message) = &self.failure {
            anyhow::bail!("capture service rejected the call: {}", message);
        }
        lock(&self.calls).push(call);
        Ok(())
    }
}

#[async_trait]
impl CaptureService for RecordingCaptureService {
    async fn invoke_direct_capture(&self, task: Task) -> anyhow::Result<()> {
        self.record(CaptureCall::DirectCapture { task })
    }

    async fn invoke_capture_with_options(&self, task: Task) -> anyhow::Result<()> {
        self.record(CaptureCall::CaptureWithOptions { task })
    }

    async fn invoke_batch_capture(&self, task: Task) -> anyhow::Result<()> {
        self.record(CaptureCall::BatchCapture { task })
    }

    async fn invoke_batch_capture_from_links(&self, task: Task) -> anyhow::Result<()> {
        self.record(CaptureCall::BatchCaptureFromLinks { task })
    }

    async fn edit_tab(&self, tab_id: TabId, force: bool) -> anyhow::Result<()> {
        self.record(CaptureCall::EditTab { tab_id, force })
    }

    async fn search_captures(&self, tabs: &[Tab], new_tab: bool) -> anyhow::Result<()> {
        self.record(CaptureCall::SearchCaptures {
            tabs: tabs.iter().map(|tab| tab.id).collect(),
            new_tab,
        })
    }

    async fn open_library(&self, new_tab: bool) -> anyhow::Result<()> {
        self.record(CaptureCall::OpenLibrary { new_tab })
    }
}

/// Options service over fixed values
#[derive(Debug, Clone, Default)]
pub struct StaticOptions {
    pub toolbar: BTreeMap<String, bool>,
    pub has_server: bool,
}

#[async_trait]
impl OptionsService for StaticOptions {
    async fn toolbar_visibility(&self) -> anyhow::Result<BTreeMap<String, bool>> {
        Ok(self.toolbar.clone())
    }

    async fn has_server(&self) -> anyhow::Result<bool> {
        Ok(self.has_server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot() -> BrowserSnapshot {
        BrowserSnapshot {
            tabs: vec![
                Tab::new(TabId(1), 0, "Web", "https://example.com/"),
                Tab::new(TabId(2), 1, "Settings", "about:preferences"),
                Tab::new(TabId(3), 2, "Local", "file:///tmp/page.html"),
                Tab::new(TabId(4), 3, "Other", "http://example.org/"),
            ],
            highlighted: vec![TabId(4), TabId(2), TabId(1)],
            current_tab: None,
            active_tab: Some(TabId(4)),
            allow_file_access: false,
        }
    }

    #[tokio::test]
    async fn test_content_tabs_filter_by_scheme() {
        let browser = MemoryBrowser::new(snapshot());
        let ids: Vec<TabId> = browser
            .list_content_tabs()
            .await
            .unwrap()
            .iter()
            .map(|tab| tab.id)
            .collect();
        assert_eq!(ids, vec![TabId(1), TabId(4)]);

        let browser = MemoryBrowser::new(BrowserSnapshot {
            allow_file_access: true,
            ..snapshot()
        });
        assert_eq!(browser.list_content_tabs().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_highlighted_tabs_keep_host_order() {
        let browser = MemoryBrowser::new(snapshot());
        let ids: Vec<TabId> = browser
            .list_highlighted_tabs()
            .await
            .unwrap()
            .iter()
            .map(|tab| tab.id)
            .collect();
        assert_eq!(ids, vec![TabId(4), TabId(1)]);
    }

    #[tokio::test]
    async fn test_queries_are_recorded() {
        let browser = MemoryBrowser::new(snapshot());
        assert!(browser.current_tab().await.unwrap().is_none());
        assert_eq!(browser.active_tab().await.unwrap().unwrap().id, TabId(4));
        browser.activate_tab(TabId(1)).await.unwrap();

        assert_eq!(
            browser.queries(),
            vec!["current_tab", "active_tab", "activate_tab"]
        );
        assert_eq!(browser.activated(), vec![TabId(1)]);
    }

    #[tokio::test]
    async fn test_failing_browser() {
        let browser = MemoryBrowser::failing(snapshot(), "tabs API unavailable");
        let err = browser.list_content_tabs().await.unwrap_err();
        assert!(err.to_string().contains("tabs API unavailable"));
    }

    #[test]
    fn test_capture_call_json_shape() {
        let call = CaptureCall::EditTab {
            tab_id: TabId(5),
            force: true,
        };
        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            serde_json::json!({"call": "editTab", "tabId": 5, "force": true})
        );
    }
}
