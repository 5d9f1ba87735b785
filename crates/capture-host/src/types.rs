//! Host data transfer objects
//!
//! These types are the snapshots the popup reads from the browser and the
//! task payloads it hands to the capture subsystem. They serialize to the
//! shapes the capture subsystem expects (camelCase keys).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Opaque browser tab identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TabId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TabId)
    }
}

/// A browser tab snapshot
///
/// The popup never owns tabs; it only reads what the host reported at
/// query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Tab identifier
    pub id: TabId,

    /// Position in its window, 0-based as reported by the browser
    pub index: u32,

    /// Page title
    #[serde(default)]
    pub title: String,

    /// Page URL
    pub url: String,
}

impl Tab {
    pub fn new(id: TabId, index: u32, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            index,
            title: title.into(),
            url: url.into(),
        }
    }

    /// 1-based position for display
    pub fn display_index(&self) -> u32 {
        self.index.saturating_add(1)
    }

    /// Label shown in the inline tab selector (e.g. "3: Example Domain")
    pub fn label(&self) -> String {
        format!("{}: {}", self.display_index(), self.title)
    }
}

/// Capture mode understood by the capture subsystem
///
/// An unset mode is expressed as `Option::<CaptureMode>::None` and lets the
/// capture subsystem pick its configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// Capture the page source as served
    Source,
    /// Only record a bookmark to the page
    Bookmark,
    /// Capture the whole tab as rendered
    Tab,
}

impl CaptureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Bookmark => "bookmark",
            Self::Tab => "tab",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tab to capture within a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEntry {
    pub tab_id: TabId,
    pub url: String,
    pub title: String,
}

impl From<&Tab> for TaskEntry {
    fn from(tab: &Tab) -> Self {
        Self {
            tab_id: tab.id,
            url: tab.url.clone(),
            title: tab.title.clone(),
        }
    }
}

/// A resolved unit of capture work
///
/// A task always holds at least one entry; use [`Task::from_tabs`] to
/// build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    tasks: Vec<TaskEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<CaptureMode>,
}

impl Task {
    /// Assemble a task from the resolved tabs, keeping their order
    ///
    /// Returns `None` when there are no tabs.
    pub fn from_tabs(tabs: &[Tab], mode: Option<CaptureMode>) -> Option<Self> {
        if tabs.is_empty() {
            return None;
        }

        Some(Self {
            tasks: tabs.iter().map(TaskEntry::from).collect(),
            mode,
        })
    }

    pub fn entries(&self) -> &[TaskEntry] {
        &self.tasks
    }

    pub fn mode(&self) -> Option<CaptureMode> {
        self.mode
    }

    pub fn tab_ids(&self) -> Vec<TabId> {
        self.tasks.iter().map(|entry| entry.tab_id).collect()
    }
}
