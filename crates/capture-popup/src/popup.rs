//! Popup controller
//!
//! Wires the host services, the startup context and the toolbar state, and
//! routes control gestures. Built once per popup instance by
//! [`Popup::init`]; no gesture is handled before it returns.

use crate::chooser::TabChooser;
use crate::context::PopupContext;
use crate::dispatch::{dispatch, resolve_command, DispatchPath};
use crate::drag::{DataTransfer, DragController, DragPayload};
use crate::error::{PopupError, Result};
use crate::modifiers::Modifiers;
use crate::targets::{selected_or_chosen, target_or_chosen};
use crate::toolbar::{ControlId, ToolbarState};
use capture_host::{CaptureService, OptionsService, PermissionService, TabId, TabQuery};
use serde::Serialize;
use std::sync::Arc;

/// Host services the popup talks to
#[derive(Clone)]
pub struct PopupHost {
    pub tabs: Arc<dyn TabQuery>,
    pub capture: Arc<dyn CaptureService>,
    pub permissions: Arc<dyn PermissionService>,
    pub options: Arc<dyn OptionsService>,
    pub chooser: Arc<dyn TabChooser>,
}

/// A click on a control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    pub control: ControlId,
    pub modifiers: Modifiers,
}

impl Gesture {
    pub fn click(control: ControlId) -> Self {
        Self {
            control,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_modifiers(control: ControlId, modifiers: Modifiers) -> Self {
        Self { control, modifiers }
    }
}

/// What a click ended up doing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ClickOutcome {
    /// A capture task was handed to the capture service
    Dispatched { path: DispatchPath, tabs: Vec<TabId> },
    /// The page editor was opened for a tab
    EditedTab { tab: TabId, activated: bool },
    /// A capture search was opened for the tabs
    SearchedCaptures { tabs: Vec<TabId> },
    /// The capture library was opened
    OpenedLibrary,
    /// The tab list was dismissed; nothing happened
    NoTarget,
    /// The control is hidden or disabled
    Ignored,
}

pub struct Popup {
    host: PopupHost,
    context: PopupContext,
    toolbar: ToolbarState,
    drag: DragController,
}

impl Popup {
    /// Load options and the popup context, then derive the toolbar state
    pub async fn init(host: PopupHost, drag: DragController) -> Result<Self> {
        let (visibility, has_server, context) = tokio::try_join!(
            async { Ok::<_, PopupError>(host.options.toolbar_visibility().await?) },
            async { Ok::<_, PopupError>(host.options.has_server().await?) },
            PopupContext::detect(host.tabs.as_ref(), host.permissions.as_ref()),
        )?;

        let target_is_content = context.target_tab().is_some_and(|tab| {
            host.tabs
                .is_content_capable_url(&tab.url, context.allow_file_access())
        });
        let toolbar = ToolbarState::build(&visibility, has_server, &context, target_is_content);

        log::info!(
            "Popup ready (prompt: {}, target tab: {:?})",
            context.is_prompt(),
            context.target_tab().map(|tab| tab.id)
        );

        Ok(Self {
            host,
            context,
            toolbar,
            drag,
        })
    }

    pub fn context(&self) -> &PopupContext {
        &self.context
    }

    pub fn toolbar(&self) -> &ToolbarState {
        &self.toolbar
    }

    /// Handle a click on a control
    pub async fn click(&self, gesture: Gesture) -> Result<ClickOutcome> {
        let control = gesture.control;
        if !self.toolbar.is_actionable(control) {
            log::debug!("Ignoring click on inactive control {}", control.as_str());
            return Ok(ClickOutcome::Ignored);
        }

        if let Some(command) = control.command() {
            let resolution = resolve_command(
                &command,
                control,
                gesture.modifiers,
                &self.context,
                self.host.tabs.as_ref(),
                self.host.chooser.as_ref(),
            )
            .await?;

            let Some(resolution) = resolution else {
                return Ok(ClickOutcome::NoTarget);
            };

            let outcome = ClickOutcome::Dispatched {
                path: resolution.path,
                tabs: resolution.task.tab_ids(),
            };
            dispatch(resolution, self.host.capture.as_ref()).await?;
            return Ok(outcome);
        }

        match control {
            ControlId::EditTab => self.edit_tab().await,
            ControlId::SearchCaptures => self.search_captures().await,
            ControlId::OpenScrapBook => {
                self.host
                    .capture
                    .open_library(self.context.target_tab().is_some())
                    .await?;
                Ok(ClickOutcome::OpenedLibrary)
            }
            _ => Ok(ClickOutcome::Ignored),
        }
    }

    /// Open the editor on the target (or picked) tab
    ///
    /// The tab is then brought to the foreground, except when the popup is
    /// a prompt over its target tab, which is already in front.
    async fn edit_tab(&self) -> Result<ClickOutcome> {
        let tab = target_or_chosen(
            ControlId::EditTab,
            &self.context,
            self.host.tabs.as_ref(),
            self.host.chooser.as_ref(),
        )
        .await?;
        let Some(tab) = tab else {
            return Ok(ClickOutcome::NoTarget);
        };

        self.host.capture.edit_tab(tab.id, true).await?;

        let activate = self.context.target_tab().is_none() || !self.context.is_prompt();
        if activate {
            self.host.tabs.activate_tab(tab.id).await?;
        }

        Ok(ClickOutcome::EditedTab {
            tab: tab.id,
            activated: activate,
        })
    }

    async fn search_captures(&self) -> Result<ClickOutcome> {
        let tabs = selected_or_chosen(
            ControlId::SearchCaptures,
            &self.context,
            self.host.tabs.as_ref(),
            self.host.chooser.as_ref(),
        )
        .await?;
        if tabs.is_empty() {
            return Ok(ClickOutcome::NoTarget);
        }

        self.host
            .capture
            .search_captures(&tabs, self.context.target_tab().is_some())
            .await?;

        Ok(ClickOutcome::SearchedCaptures {
            tabs: tabs.iter().map(|tab| tab.id).collect(),
        })
    }

    /// Start dragging a control
    ///
    /// Returns `None` without touching `transfer` when the control cannot
    /// be dragged (not a capture control, disabled, or no target tab).
    pub fn drag_start(
        &self,
        control: ControlId,
        transfer: &mut dyn DataTransfer,
    ) -> Result<Option<DragPayload>> {
        let command = match control.command() {
            Some(command) if self.toolbar.can_drag(control) => command,
            _ => {
                log::debug!("Control {} is not draggable", control.as_str());
                return Ok(None);
            }
        };

        self.drag
            .on_drag_start(self.context.target_tab(), &command, transfer)
            .map(Some)
    }

    pub fn drag_end(&self) {
        self.drag.on_drag_end();
    }
}
