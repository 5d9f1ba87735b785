//! Command dispatch
//!
//! Turns a gesture on a capture control into a task and hands it to the
//! capture service: targets first, then mode, then the dispatch path.

use crate::chooser::TabChooser;
use crate::command::{Command, CommandKind};
use crate::context::PopupContext;
use crate::error::Result;
use crate::mode::resolve_mode;
use crate::modifiers::Modifiers;
use crate::targets::resolve_targets;
use crate::toolbar::ControlId;
use capture_host::{CaptureService, TabQuery, Task};
use serde::Serialize;

/// Capture service entry point a resolved command goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DispatchPath {
    DirectCapture,
    CaptureWithOptions,
    BatchCapture,
    BatchCaptureLinks,
}

impl DispatchPath {
    /// Entry point for a command kind
    ///
    /// Ctrl switches the plain capture command to the capture-with-options
    /// flow; other kinds ignore it.
    pub fn select(kind: CommandKind, modifiers: Modifiers) -> Self {
        match kind {
            CommandKind::Capture if modifiers.ctrl() => Self::CaptureWithOptions,
            CommandKind::Capture => Self::DirectCapture,
            CommandKind::CaptureAs => Self::CaptureWithOptions,
            CommandKind::BatchCapture => Self::BatchCapture,
            CommandKind::BatchCaptureLinks => Self::BatchCaptureLinks,
        }
    }
}

/// A fully resolved command, ready to dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: DispatchPath,
    pub task: Task,
}

/// Resolve targets, mode and dispatch path for a command
///
/// Returns `None` when no tab was targeted (the tab list was dismissed).
pub async fn resolve_command(
    command: &Command,
    anchor: ControlId,
    modifiers: Modifiers,
    context: &PopupContext,
    tabs: &dyn TabQuery,
    chooser: &dyn TabChooser,
) -> Result<Option<Resolution>> {
    let targets = resolve_targets(command, anchor, context, tabs, chooser).await?;
    let mode = resolve_mode(command.declared_mode(), modifiers);

    let Some(task) = Task::from_tabs(&targets, mode) else {
        log::debug!("{}: no target tabs, not dispatching", command.kind().as_str());
        return Ok(None);
    };

    Ok(Some(Resolution {
        path: DispatchPath::select(command.kind(), modifiers),
        task,
    }))
}

/// Hand a resolved task to the capture service
pub async fn dispatch(resolution: Resolution, capture: &dyn CaptureService) -> Result<()> {
    let Resolution { path, task } = resolution;
    match path {
        DispatchPath::DirectCapture => capture.invoke_direct_capture(task).await?,
        DispatchPath::CaptureWithOptions => capture.invoke_capture_with_options(task).await?,
        DispatchPath::BatchCapture => capture.invoke_batch_capture(task).await?,
        DispatchPath::BatchCaptureLinks => capture.invoke_batch_capture_from_links(task).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chooser::ScriptedChooser;
    use capture_host::memory::{BrowserSnapshot, CaptureCall, MemoryBrowser, RecordingCaptureService};
    use capture_host::{CaptureMode, Tab, TabId};
    use pretty_assertions::assert_eq;

    fn snapshot() -> BrowserSnapshot {
        BrowserSnapshot {
            tabs: vec![
                Tab::new(TabId(3), 2, "Three", "https://example.com/3"),
                Tab::new(TabId(5), 4, "Five", "https://example.com/5"),
                Tab::new(TabId(8), 7, "Eight", "https://example.com/8"),
            ],
            highlighted: vec![TabId(3), TabId(8)],
            ..Default::default()
        }
    }

    fn tab(id: i64) -> Tab {
        snapshot()
            .tabs
            .into_iter()
            .find(|tab| tab.id == TabId(id))
            .unwrap()
    }

    #[test]
    fn test_ctrl_only_switches_plain_capture() {
        assert_eq!(
            DispatchPath::select(CommandKind::Capture, Modifiers::empty()),
            DispatchPath::DirectCapture
        );
        assert_eq!(
            DispatchPath::select(CommandKind::Capture, Modifiers::CTRL | Modifiers::SHIFT),
            DispatchPath::CaptureWithOptions
        );
        for modifiers in [Modifiers::empty(), Modifiers::CTRL] {
            assert_eq!(
                DispatchPath::select(CommandKind::CaptureAs, modifiers),
                DispatchPath::CaptureWithOptions
            );
            assert_eq!(
                DispatchPath::select(CommandKind::BatchCapture, modifiers),
                DispatchPath::BatchCapture
            );
            assert_eq!(
                DispatchPath::select(CommandKind::BatchCaptureLinks, modifiers),
                DispatchPath::BatchCaptureLinks
            );
        }
    }

    #[tokio::test]
    async fn test_ctrl_capture_with_target_tab() {
        // capture, unset mode, ctrl held, target tab #3
        let browser = MemoryBrowser::new(snapshot());
        let chooser = ScriptedChooser::dismissing();
        let context = PopupContext::new(true, Some(tab(3)), false);

        let resolution = resolve_command(
            &Command::new(CommandKind::Capture),
            ControlId::CaptureTab,
            Modifiers::CTRL,
            &context,
            &browser,
            &chooser,
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(resolution.path, DispatchPath::CaptureWithOptions);
        assert_eq!(resolution.task.mode(), None);
        assert_eq!(resolution.task.tab_ids(), vec![TabId(3), TabId(8)]);
        assert!(chooser.offers().is_empty());
    }

    #[tokio::test]
    async fn test_batch_links_with_picked_tab() {
        // batchCaptureLinks, source, no target tab, user picks tab #5
        let browser = MemoryBrowser::new(snapshot());
        let chooser = ScriptedChooser::picking(TabId(5));
        let capture = RecordingCaptureService::default();
        let context = PopupContext::new(false, None, false);
        let command = Command::new(CommandKind::BatchCaptureLinks).with_mode(CaptureMode::Source);

        let resolution = resolve_command(
            &command,
            ControlId::BatchCaptureLinks,
            Modifiers::empty(),
            &context,
            &browser,
            &chooser,
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(resolution.path, DispatchPath::BatchCaptureLinks);

        dispatch(resolution, &capture).await.unwrap();

        let expected = Task::from_tabs(&[tab(5)], Some(CaptureMode::Source)).unwrap();
        assert_eq!(
            capture.calls(),
            vec![CaptureCall::BatchCaptureFromLinks { task: expected }]
        );
    }

    #[tokio::test]
    async fn test_dismissed_pick_resolves_to_nothing() {
        let browser = MemoryBrowser::new(snapshot());
        let chooser = ScriptedChooser::dismissing();
        let context = PopupContext::new(false, None, false);

        let resolution = resolve_command(
            &Command::new(CommandKind::Capture),
            ControlId::CaptureTab,
            Modifiers::ALT,
            &context,
            &browser,
            &chooser,
        )
        .await
        .unwrap();

        assert!(resolution.is_none());
    }

    #[tokio::test]
    async fn test_alt_bookmarks_every_path() {
        let browser = MemoryBrowser::new(snapshot());
        let chooser = ScriptedChooser::dismissing();
        let context = PopupContext::new(true, Some(tab(3)), false);

        let resolution = resolve_command(
            &Command::new(CommandKind::BatchCapture).for_all_tabs(),
            ControlId::BatchCapture,
            Modifiers::ALT | Modifiers::SHIFT,
            &context,
            &browser,
            &chooser,
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(resolution.path, DispatchPath::BatchCapture);
        assert_eq!(resolution.task.mode(), Some(CaptureMode::Bookmark));
        assert_eq!(resolution.task.tab_ids(), vec![TabId(3), TabId(5), TabId(8)]);
    }

    #[tokio::test]
    async fn test_capture_failure_propagates() {
        let capture = RecordingCaptureService::failing("background page gone");
        let task = Task::from_tabs(&[tab(3)], None).unwrap();
        let resolution = Resolution {
            path: DispatchPath::DirectCapture,
            task,
        };

        let err = dispatch(resolution, &capture).await.unwrap_err();
        assert!(err.to_string().contains("background page gone"));
    }
}
