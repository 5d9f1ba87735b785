//! Target resolution
//!
//! Decides which tabs a command applies to, in strict priority order:
//! 1. commands for all tabs take every content tab
//! 2. with a target tab, the highlighted tabs of the window
//! 3. otherwise the single tab the user picks from a list

use crate::chooser::TabChooser;
use crate::command::Command;
use crate::context::PopupContext;
use crate::error::Result;
use crate::toolbar::ControlId;
use capture_host::{Tab, TabQuery};

/// Tabs `command` applies to, in host order
///
/// An empty result means the user dismissed the tab list; nothing should
/// be dispatched then.
pub async fn resolve_targets(
    command: &Command,
    anchor: ControlId,
    context: &PopupContext,
    tabs: &dyn TabQuery,
    chooser: &dyn TabChooser,
) -> Result<Vec<Tab>> {
    if command.is_for_all_tabs() {
        let content_tabs = tabs.list_content_tabs().await?;
        log::debug!("Targets: all {} content tab(s)", content_tabs.len());
        return Ok(content_tabs);
    }

    selected_or_chosen(anchor, context, tabs, chooser).await
}

/// Highlighted tabs when there is a target tab, else one user-picked tab
pub async fn selected_or_chosen(
    anchor: ControlId,
    context: &PopupContext,
    tabs: &dyn TabQuery,
    chooser: &dyn TabChooser,
) -> Result<Vec<Tab>> {
    match context.target_tab() {
        Some(target) => {
            let highlighted = tabs.list_highlighted_tabs().await?;
            if highlighted.is_empty() {
                log::debug!("Targets: no highlighted tabs, using target tab {}", target.id);
                return Ok(vec![target.clone()]);
            }
            log::debug!("Targets: {} highlighted tab(s)", highlighted.len());
            Ok(highlighted)
        }
        None => Ok(choose_tab(anchor, tabs, chooser).await?.into_iter().collect()),
    }
}

/// The target tab, or one user-picked tab when there is none
pub async fn target_or_chosen(
    anchor: ControlId,
    context: &PopupContext,
    tabs: &dyn TabQuery,
    chooser: &dyn TabChooser,
) -> Result<Option<Tab>> {
    match context.target_tab() {
        Some(target) => Ok(Some(target.clone())),
        None => choose_tab(anchor, tabs, chooser).await,
    }
}

/// Ask the user to pick one of the content tabs
async fn choose_tab(
    anchor: ControlId,
    tabs: &dyn TabQuery,
    chooser: &dyn TabChooser,
) -> Result<Option<Tab>> {
    let content_tabs = tabs.list_content_tabs().await?;
    let picked = chooser.present_choices(anchor, content_tabs).await;
    match &picked {
        Some(tab) => log::debug!("Targets: user picked tab {}", tab.id),
        None => log::debug!("Targets: tab selection dismissed"),
    }
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chooser::ScriptedChooser;
    use crate::command::CommandKind;
    use capture_host::memory::{BrowserSnapshot, MemoryBrowser};
    use capture_host::TabId;
    use pretty_assertions::assert_eq;

    fn snapshot() -> BrowserSnapshot {
        BrowserSnapshot {
            tabs: vec![
                Tab::new(TabId(3), 0, "Three", "https://example.com/3"),
                Tab::new(TabId(4), 1, "Blank", "about:blank"),
                Tab::new(TabId(5), 2, "Five", "https://example.com/5"),
                Tab::new(TabId(6), 3, "Six", "https://example.com/6"),
            ],
            highlighted: vec![TabId(6), TabId(3)],
            ..Default::default()
        }
    }

    fn attached() -> PopupContext {
        PopupContext::new(true, Some(Tab::new(TabId(3), 0, "Three", "https://example.com/3")), false)
    }

    fn detached() -> PopupContext {
        PopupContext::new(false, None, false)
    }

    fn ids(tabs: &[Tab]) -> Vec<TabId> {
        tabs.iter().map(|tab| tab.id).collect()
    }

    #[tokio::test]
    async fn test_for_all_tabs_uses_content_tabs_only() {
        let command = Command::new(CommandKind::BatchCapture).for_all_tabs();
        for context in [attached(), detached()] {
            let browser = MemoryBrowser::new(snapshot());
            let chooser = ScriptedChooser::picking(TabId(5));

            let targets = resolve_targets(&command, ControlId::BatchCapture, &context, &browser, &chooser)
                .await
                .unwrap();

            assert_eq!(ids(&targets), vec![TabId(3), TabId(5), TabId(6)]);
            assert_eq!(browser.queries(), vec!["list_content_tabs"]);
            assert!(chooser.offers().is_empty());
        }
    }

    #[tokio::test]
    async fn test_target_tab_uses_highlighted_tabs() {
        let browser = MemoryBrowser::new(snapshot());
        let chooser = ScriptedChooser::picking(TabId(5));
        let command = Command::new(CommandKind::Capture);

        let targets = resolve_targets(&command, ControlId::CaptureTab, &attached(), &browser, &chooser)
            .await
            .unwrap();

        assert_eq!(ids(&targets), vec![TabId(6), TabId(3)]);
        assert_eq!(browser.queries(), vec!["list_highlighted_tabs"]);
        assert!(chooser.offers().is_empty());
    }

    #[tokio::test]
    async fn test_no_highlight_falls_back_to_target_tab() {
        let browser = MemoryBrowser::new(BrowserSnapshot {
            highlighted: Vec::new(),
            ..snapshot()
        });
        let chooser = ScriptedChooser::dismissing();
        let command = Command::new(CommandKind::CaptureAs);

        let targets = resolve_targets(&command, ControlId::CaptureTabAs, &attached(), &browser, &chooser)
            .await
            .unwrap();

        assert_eq!(ids(&targets), vec![TabId(3)]);
    }

    #[tokio::test]
    async fn test_without_target_tab_user_picks_one() {
        let browser = MemoryBrowser::new(snapshot());
        let chooser = ScriptedChooser::picking(TabId(5));
        let command = Command::new(CommandKind::Capture);

        let targets = resolve_targets(&command, ControlId::CaptureTab, &detached(), &browser, &chooser)
            .await
            .unwrap();

        assert_eq!(ids(&targets), vec![TabId(5)]);
        assert_eq!(
            chooser.offers(),
            vec![(ControlId::CaptureTab, vec![TabId(3), TabId(5), TabId(6)])]
        );
        assert!(!browser.queries().contains(&"list_highlighted_tabs"));
    }

    #[tokio::test]
    async fn test_dismissed_pick_yields_nothing() {
        let browser = MemoryBrowser::new(snapshot());
        let chooser = ScriptedChooser::dismissing();
        let command = Command::new(CommandKind::Capture);

        let targets = resolve_targets(&command, ControlId::CaptureTab, &detached(), &browser, &chooser)
            .await
            .unwrap();

        assert!(targets.is_empty());
    }

    #[tokio::test]
    async fn test_target_or_chosen() {
        let browser = MemoryBrowser::new(snapshot());
        let chooser = ScriptedChooser::picking(TabId(6));

        let tab = target_or_chosen(ControlId::EditTab, &attached(), &browser, &chooser)
            .await
            .unwrap();
        assert_eq!(tab.map(|tab| tab.id), Some(TabId(3)));
        assert!(browser.queries().is_empty());

        let tab = target_or_chosen(ControlId::EditTab, &detached(), &browser, &chooser)
            .await
            .unwrap();
        assert_eq!(tab.map(|tab| tab.id), Some(TabId(6)));
    }

    #[tokio::test]
    async fn test_query_failure_propagates() {
        let browser = MemoryBrowser::failing(snapshot(), "tabs API unavailable");
        let chooser = ScriptedChooser::picking(TabId(5));
        let command = Command::new(CommandKind::Capture);

        let result =
            resolve_targets(&command, ControlId::CaptureTab, &attached(), &browser, &chooser).await;
        assert!(result.is_err());
    }
}
