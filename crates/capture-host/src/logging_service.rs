//! Logging capture service (decorator pattern)
//!
//! Wraps any `CaptureService` implementation and logs every invocation
//! before delegating. Failures are logged and passed through unchanged.

use crate::services::CaptureService;
use crate::types::{Tab, TabId, Task};
use async_trait::async_trait;
use log::{info, warn};

/// Capture service decorator that logs each call
///
/// # Example
///
/// ```rust,ignore
/// use capture_host::{LoggingCaptureService, memory::RecordingCaptureService};
///
/// let service = LoggingCaptureService::new(RecordingCaptureService::default());
/// ```
#[derive(Debug, Clone)]
pub struct LoggingCaptureService<C: CaptureService> {
    inner: C,
}

impl<C: CaptureService> LoggingCaptureService<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Get a reference to the inner service
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Consume the decorator and return the inner service
    pub fn into_inner(self) -> C {
        self.inner
    }
}

fn describe(task: &Task) -> String {
    let ids: Vec<String> = task.tab_ids().iter().map(TabId::to_string).collect();
    match task.mode() {
        Some(mode) => format!("tabs [{}] mode {}", ids.join(", "), mode),
        None => format!("tabs [{}] mode <default>", ids.join(", ")),
    }
}

fn report(call: &str, result: anyhow::Result<()>) -> anyhow::Result<()> {
    if let Err(e) = &result {
        warn!("{} failed: {:#}", call, e);
    }
    result
}

#[async_trait]
impl<C: CaptureService> CaptureService for LoggingCaptureService<C> {
    async fn invoke_direct_capture(&self, task: Task) -> anyhow::Result<()> {
        info!("Direct capture: {}", describe(&task));
        report("Direct capture", self.inner.invoke_direct_capture(task).await)
    }

    async fn invoke_capture_with_options(&self, task: Task) -> anyhow::Result<()> {
        info!("Capture with options: {}", describe(&task));
        report(
            "Capture with options",
            self.inner.invoke_capture_with_options(task).await,
        )
    }

    async fn invoke_batch_capture(&self, task: Task) -> anyhow::Result<()> {
        info!("Batch capture: {}", describe(&task));
        report("Batch capture", self.inner.invoke_batch_capture(task).await)
    }

    async fn invoke_batch_capture_from_links(&self, task: Task) -> anyhow::Result<()> {
        info!("Batch capture from links: {}", describe(&task));
        report(
            "Batch capture from links",
            self.inner.invoke_batch_capture_from_links(task).await,
        )
    }

    async fn edit_tab(&self, tab_id: TabId, force: bool) -> anyhow::Result<()> {
        info!("Edit tab {} (force: {})", tab_id, force);
        report("Edit tab", self.inner.edit_tab(tab_id, force).await)
    }

    async fn search_captures(&self, tabs: &[Tab], new_tab: bool) -> anyhow::Result<()> {
        info!(
            "Search captures for {} tab(s) (new tab: {})",
            tabs.len(),
            new_tab
        );
        report(
            "Search captures",
            self.inner.search_captures(tabs, new_tab).await,
        )
    }

    async fn open_library(&self, new_tab: bool) -> anyhow::Result<()> {
        info!("Open library (new tab: {})", new_tab);
        report("Open library", self.inner.open_library(new_tab).await)
    }
}
