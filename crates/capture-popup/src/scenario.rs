//! Dry-run scenarios
//!
//! A scenario describes a browser window, one gesture on a popup control
//! and the tab the user would pick if asked. Running it resolves the
//! gesture against in-memory host services and reports what the capture
//! service would have received.

use anyhow::{Context, Result};
use capture_host::memory::{BrowserSnapshot, CaptureCall, MemoryBrowser, RecordingCaptureService};
use capture_host::{LoggingCaptureService, TabId};
use capture_popup::drag::{Deferral, MarkerSet, NextTick, QueuedDeferral};
use capture_popup::{
    ClickOutcome, ConfigOptions, ControlId, DragController, DragData, Gesture, Modifiers, Popup,
    PopupHost, ScriptedChooser, TabChooser, ToolbarState,
};
use capture_popup_config::PopupConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureAction {
    #[default]
    Click,
    Drag,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioGesture {
    pub control: ControlId,
    #[serde(default)]
    pub action: GestureAction,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Tab the user picks when asked; absent means the list is dismissed
    #[serde(default)]
    pub choose: Option<TabId>,
    pub browser: BrowserSnapshot,
    pub gesture: ScenarioGesture,
}

impl Scenario {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse scenario")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {:?}", path))?;
        Self::parse(&content)
    }
}

/// What the dry run observed
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub prompt: bool,
    pub target_tab: Option<TabId>,
    pub toolbar: ToolbarState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ClickOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drag: Option<DragData>,
    pub calls: Vec<CaptureCall>,
}

pub async fn run(scenario: Scenario, config: PopupConfig) -> Result<Report> {
    let browser = Arc::new(MemoryBrowser::new(scenario.browser));
    let capture = Arc::new(LoggingCaptureService::new(RecordingCaptureService::default()));
    let chooser: Arc<dyn TabChooser> = match scenario.choose {
        Some(tab_id) => Arc::new(ScriptedChooser::picking(tab_id)),
        None => Arc::new(ScriptedChooser::dismissing()),
    };
    let deferral: Arc<dyn Deferral> = match NextTick::current() {
        Some(next_tick) => Arc::new(next_tick),
        None => Arc::new(QueuedDeferral::default()),
    };

    let host = PopupHost {
        tabs: browser.clone(),
        capture: capture.clone(),
        permissions: browser.clone(),
        options: Arc::new(ConfigOptions::new(config)),
        chooser,
    };
    let drag = DragController::new(Arc::new(MarkerSet::default()), deferral);
    let popup = Popup::init(host, drag).await?;

    let gesture = &scenario.gesture;
    let (outcome, drag) = match gesture.action {
        GestureAction::Click => {
            let modifiers = Modifiers::from_keys(gesture.alt, gesture.shift, gesture.ctrl);
            let outcome = popup
                .click(Gesture::with_modifiers(gesture.control, modifiers))
                .await?;
            (Some(outcome), None)
        }
        GestureAction::Drag => {
            let mut data = DragData::default();
            let started = popup.drag_start(gesture.control, &mut data)?;
            popup.drag_end();
            if started.is_none() {
                log::info!("Control {} cannot be dragged", gesture.control.as_str());
            }
            (None, Some(data))
        }
    };

    Ok(Report {
        prompt: popup.context().is_prompt(),
        target_tab: popup.context().target_tab().map(|tab| tab.id),
        toolbar: popup.toolbar().clone(),
        outcome,
        drag,
        calls: capture.inner().calls(),
    })
}
