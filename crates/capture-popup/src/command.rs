//! Capture commands
//!
//! A command is what a toolbar control asks for: which capture flow, which
//! default mode, and whether it spans every content tab. Commands are built
//! fresh for each gesture and never change afterwards.

use capture_host::CaptureMode;
use serde::{Deserialize, Serialize};

/// The capture flow a command invokes
///
/// Serialized as camelCase (e.g., `BatchCaptureLinks` -> `"batchCaptureLinks"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandKind {
    /// Capture the target tabs
    Capture,
    /// Capture the target tabs through the options dialog
    CaptureAs,
    /// Batch capture the target tabs
    BatchCapture,
    /// Batch capture the links found in the target tabs
    BatchCaptureLinks,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Capture => "capture",
            Self::CaptureAs => "captureAs",
            Self::BatchCapture => "batchCapture",
            Self::BatchCaptureLinks => "batchCaptureLinks",
        }
    }
}

/// A capture command with its static parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    declared_mode: Option<CaptureMode>,
    for_all_tabs: bool,
}

impl Command {
    /// A command with no declared mode that targets the current selection
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            declared_mode: None,
            for_all_tabs: false,
        }
    }

    pub fn with_mode(self, mode: CaptureMode) -> Self {
        Self {
            declared_mode: Some(mode),
            ..self
        }
    }

    pub fn with_declared_mode(self, mode: Option<CaptureMode>) -> Self {
        Self {
            declared_mode: mode,
            ..self
        }
    }

    /// Target every content tab instead of the current selection
    pub fn for_all_tabs(self) -> Self {
        Self {
            for_all_tabs: true,
            ..self
        }
    }

    pub fn with_for_all_tabs(self, for_all_tabs: bool) -> Self {
        Self {
            for_all_tabs,
            ..self
        }
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn declared_mode(&self) -> Option<CaptureMode> {
        self.declared_mode
    }

    pub fn is_for_all_tabs(&self) -> bool {
        self.for_all_tabs
    }
}
