//! Browser host services for the capture popup
//!
//! This crate defines the services the popup consumes from its host
//! browser and extension: tab queries, the capture subsystem, the
//! file-access permission and the options store. The popup never talks
//! to the browser directly; it only sees these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              CaptureService trait                │
//! │  - invoke_direct_capture()                       │
//! │  - invoke_batch_capture()                        │
//! │  - edit_tab() / search_captures() / ...          │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌──────────────────────┐    ┌─────────────────────────┐
//! │ RecordingCapture-    │    │ LoggingCaptureService   │
//! │ Service (in-memory)  │◄───│ (decorator)             │
//! └──────────────────────┘    └─────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use capture_host::memory::{BrowserSnapshot, MemoryBrowser, RecordingCaptureService};
//! use capture_host::{CaptureService, LoggingCaptureService, Tab, TabId, TabQuery, Task};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let browser = MemoryBrowser::new(BrowserSnapshot {
//!     tabs: vec![Tab::new(TabId(1), 0, "Example", "https://example.com/")],
//!     ..Default::default()
//! });
//! let capture = LoggingCaptureService::new(RecordingCaptureService::default());
//!
//! let tabs = browser.list_content_tabs().await?;
//! if let Some(task) = Task::from_tabs(&tabs, None) {
//!     capture.invoke_direct_capture(task).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod logging_service;
pub mod memory;
pub mod services;
pub mod types;
pub mod url;

pub use logging_service::LoggingCaptureService;
pub use services::{CaptureService, OptionsService, PermissionService, TabQuery};
pub use types::{CaptureMode, Tab, TabId, Task, TaskEntry};
pub use url::is_content_capable_url;
