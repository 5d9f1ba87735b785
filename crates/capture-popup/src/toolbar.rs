//! Toolbar controls
//!
//! Every control of the popup has a stable id (also its element id and the
//! suffix of its `ui.toolbar.show*` option). The toolbar state decides,
//! once at startup, which controls are hidden, disabled or draggable.

use crate::command::{Command, CommandKind};
use crate::context::PopupContext;
use capture_host::CaptureMode;
use capture_popup_config::TOOLBAR_OPTION_PREFIX;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Identifier of a toolbar control
///
/// Serialized as camelCase (e.g., `CaptureTabAs` -> `"captureTabAs"`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    IntoStaticStr,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum ControlId {
    CaptureTab,
    CaptureTabSource,
    CaptureTabBookmark,
    CaptureTabAs,
    BatchCapture,
    BatchCaptureLinks,
    EditTab,
    SearchCaptures,
    OpenScrapBook,
}

impl ControlId {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Control named by a toolbar option key
    ///
    /// `ui.toolbar.showCaptureTab` names `captureTab`.
    pub fn from_option_key(key: &str) -> Option<Self> {
        let name = key.strip_prefix(TOOLBAR_OPTION_PREFIX)?;
        let mut chars = name.chars();
        let first = chars.next()?;
        let id = format!("{}{}", first.to_ascii_lowercase(), chars.as_str());
        Self::from_str(&id).ok()
    }

    /// The capture command this control issues, if it is a capture control
    pub fn command(self) -> Option<Command> {
        let command = match self {
            Self::CaptureTab => Command::new(CommandKind::Capture),
            Self::CaptureTabSource => {
                Command::new(CommandKind::Capture).with_mode(CaptureMode::Source)
            }
            Self::CaptureTabBookmark => {
                Command::new(CommandKind::Capture).with_mode(CaptureMode::Bookmark)
            }
            Self::CaptureTabAs => Command::new(CommandKind::CaptureAs),
            Self::BatchCapture => Command::new(CommandKind::BatchCapture).for_all_tabs(),
            Self::BatchCaptureLinks => {
                Command::new(CommandKind::BatchCaptureLinks).with_mode(CaptureMode::Source)
            }
            Self::EditTab | Self::SearchCaptures | Self::OpenScrapBook => return None,
        };
        Some(command)
    }

    /// Controls that can be dragged out of the popup
    pub fn supports_drag(self) -> bool {
        matches!(
            self,
            Self::CaptureTab | Self::CaptureTabSource | Self::CaptureTabBookmark | Self::CaptureTabAs
        )
    }

    /// Controls that act on the target tab and need it to be a content page
    pub fn is_tab_specific(self) -> bool {
        matches!(
            self,
            Self::CaptureTab
                | Self::CaptureTabSource
                | Self::CaptureTabBookmark
                | Self::CaptureTabAs
                | Self::BatchCaptureLinks
                | Self::EditTab
                | Self::SearchCaptures
        )
    }

    /// Controls that need a backend server
    pub fn needs_server(self) -> bool {
        matches!(self, Self::SearchCaptures | Self::OpenScrapBook)
    }
}

/// Display state of one control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ControlState {
    pub hidden: bool,
    pub disabled: bool,
    pub draggable: bool,
}

impl ControlState {
    /// Whether clicks on the control should be handled
    pub fn is_actionable(&self) -> bool {
        !self.hidden && !self.disabled
    }
}

/// Display state of every control, fixed at popup startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolbarState {
    controls: BTreeMap<ControlId, ControlState>,
}

impl ToolbarState {
    /// Derive control states from options and the popup context
    ///
    /// * `visibility` - toolbar options keyed by `ui.toolbar.show*`
    /// * `has_server` - whether a backend server is configured
    /// * `target_is_content` - whether the target tab (if any) is capturable
    pub fn build(
        visibility: &BTreeMap<String, bool>,
        has_server: bool,
        context: &PopupContext,
        target_is_content: bool,
    ) -> Self {
        let mut controls: BTreeMap<ControlId, ControlState> = ControlId::iter()
            .map(|id| (id, ControlState::default()))
            .collect();

        for (key, shown) in visibility {
            match ControlId::from_option_key(key) {
                Some(id) => {
                    if let Some(state) = controls.get_mut(&id) {
                        state.hidden = !shown;
                    }
                }
                None => log::warn!("Ignoring unknown toolbar option: {}", key),
            }
        }

        for (id, state) in controls.iter_mut() {
            if id.needs_server() && !has_server {
                state.disabled = true;
            }

            if context.target_tab().is_some() {
                state.draggable = id.supports_drag();
                if !target_is_content && id.is_tab_specific() {
                    state.disabled = true;
                }
            }
        }

        log::debug!("Toolbar state: {:?}", controls);
        Self { controls }
    }

    pub fn state(&self, id: ControlId) -> ControlState {
        self.controls.get(&id).copied().unwrap_or_default()
    }

    pub fn is_actionable(&self, id: ControlId) -> bool {
        self.state(id).is_actionable()
    }

    /// Whether a drag may start from the control
    ///
    /// Disabled controls cannot be dragged either.
    pub fn can_drag(&self, id: ControlId) -> bool {
        let state = self.state(id);
        state.draggable && state.is_actionable()
    }
}
