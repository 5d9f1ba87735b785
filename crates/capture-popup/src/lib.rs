//! Command resolution for a page-capture toolbar popup
//!
//! A click on a popup control is resolved into a capture task in three
//! steps, then dispatched to the capture service:
//!
//! ```text
//! gesture ──► targets (targets.rs) ──► mode (mode.rs) ──► Task ──► CaptureService
//!                 │
//!                 └── no target tab: TabChooser asks the user
//! ```
//!
//! Capture controls can also be dragged out of the popup; the drag carries
//! the command and source tab (drag.rs) and the drop target runs it.
//!
//! [`Popup`] ties it together; the host provides the services from
//! `capture_host`.

pub mod chooser;
pub mod command;
pub mod context;
pub mod dispatch;
pub mod drag;
pub mod error;
pub mod mode;
pub mod modifiers;
pub mod options;
pub mod popup;
pub mod targets;
pub mod toolbar;

pub use chooser::{InlineSelector, ScriptedChooser, TabChooser};
pub use command::{Command, CommandKind};
pub use context::PopupContext;
pub use dispatch::{dispatch, resolve_command, DispatchPath, Resolution};
pub use drag::{DataTransfer, DragController, DragData, DragPayload};
pub use error::{PopupError, Result};
pub use mode::resolve_mode;
pub use modifiers::Modifiers;
pub use options::ConfigOptions;
pub use popup::{ClickOutcome, Gesture, Popup, PopupHost};
pub use targets::resolve_targets;
pub use toolbar::{ControlId, ControlState, ToolbarState};
