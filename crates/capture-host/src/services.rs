//! Host service traits
//!
//! This module defines the interfaces the popup consumes from the browser
//! and the extension's background page. Implementations talk to the real
//! host; the `memory` module provides in-process ones.

use crate::types::{Tab, TabId, Task};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Browser tab queries
///
/// Results are ordered as the host reports them; callers must not re-sort.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks.
#[async_trait]
pub trait TabQuery: Send + Sync {
    /// The tab hosting the popup page
    ///
    /// Returns `None` when the popup is a prompt rather than a page
    /// opened in a real tab.
    async fn current_tab(&self) -> anyhow::Result<Option<Tab>>;

    /// The active tab of the current window, if any
    async fn active_tab(&self) -> anyhow::Result<Option<Tab>>;

    /// All tabs whose page the extension may capture
    async fn list_content_tabs(&self) -> anyhow::Result<Vec<Tab>>;

    /// Tabs highlighted (multi-selected) in the current window
    ///
    /// Only content-capable tabs are returned. Hosts without a
    /// multi-highlight concept return an empty list.
    async fn list_highlighted_tabs(&self) -> anyhow::Result<Vec<Tab>>;

    /// Bring a tab to the foreground
    async fn activate_tab(&self, tab_id: TabId) -> anyhow::Result<()>;

    /// Whether a page at `url` is capturable given the file-access grant
    fn is_content_capable_url(&self, url: &str, allow_file_access: bool) -> bool {
        crate::url::is_content_capable_url(url, allow_file_access)
    }
}

/// The external capture subsystem
#[async_trait]
pub trait CaptureService: Send + Sync {
    /// Capture the task's tabs right away
    async fn invoke_direct_capture(&self, task: Task) -> anyhow::Result<()>;

    /// Open the multi-step capture-with-options flow for the task
    async fn invoke_capture_with_options(&self, task: Task) -> anyhow::Result<()>;

    /// Open the batch capture flow for the task's tabs
    async fn invoke_batch_capture(&self, task: Task) -> anyhow::Result<()>;

    /// Open the batch capture flow for the links found in the task's tabs
    async fn invoke_batch_capture_from_links(&self, task: Task) -> anyhow::Result<()>;

    /// Open the page editor for a tab
    async fn edit_tab(&self, tab_id: TabId, force: bool) -> anyhow::Result<()>;

    /// Search existing captures for the given tabs
    async fn search_captures(&self, tabs: &[Tab], new_tab: bool) -> anyhow::Result<()>;

    /// Open the capture library
    async fn open_library(&self, new_tab: bool) -> anyhow::Result<()>;
}

/// Extension permission queries
#[async_trait]
pub trait PermissionService: Send + Sync {
    /// Whether the user granted the extension access to file URLs
    async fn is_file_access_allowed(&self) -> anyhow::Result<bool>;
}

/// Read-only view of the extension options the popup needs
#[async_trait]
pub trait OptionsService: Send + Sync {
    /// Toolbar visibility options keyed by option name (`ui.toolbar.show*`)
    async fn toolbar_visibility(&self) -> anyhow::Result<BTreeMap<String, bool>>;

    /// Whether a backend server is configured
    async fn has_server(&self) -> anyhow::Result<bool>;
}
