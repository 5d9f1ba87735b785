//! Interactive tab selection
//!
//! When the popup has no target tab, a command asks the user to pick one.
//! The resolver only sees the [`TabChooser`] capability; how choices are
//! shown is up to the implementation.

use crate::toolbar::ControlId;
use async_trait::async_trait;
use capture_host::{Tab, TabId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::oneshot;

/// Presents tabs to the user and waits for a pick
#[async_trait]
pub trait TabChooser: Send + Sync {
    /// Offer `tabs` next to the `anchor` control
    ///
    /// Resolves to the chosen tab, or `None` when the choice was dismissed.
    async fn present_choices(&self, anchor: ControlId, tabs: Vec<Tab>) -> Option<Tab>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct OpenSelector {
    choices: Vec<Tab>,
    reply: oneshot::Sender<Tab>,
}

/// Inline list of tab buttons anchored below a control
///
/// The rendering layer reads [`InlineSelector::labels`] to draw the list
/// and reports clicks through [`InlineSelector::choose`]. Re-opening the
/// list on an anchor that already shows one replaces it: the earlier wait
/// resolves as dismissed and the list is rebuilt from the new tabs.
#[derive(Default)]
pub struct InlineSelector {
    open: Mutex<HashMap<ControlId, OpenSelector>>,
}

impl InlineSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, anchor: ControlId) -> bool {
        lock(&self.open).contains_key(&anchor)
    }

    /// Button labels of the list open at `anchor`, in display order
    pub fn labels(&self, anchor: ControlId) -> Vec<String> {
        lock(&self.open)
            .get(&anchor)
            .map(|selector| selector.choices.iter().map(Tab::label).collect())
            .unwrap_or_default()
    }

    /// Pick the button at `position`; closes the list
    ///
    /// Returns false when no list is open at `anchor` or the position is
    /// out of range (the list then stays open).
    pub fn choose(&self, anchor: ControlId, position: usize) -> bool {
        let mut open = lock(&self.open);
        let in_range = open
            .get(&anchor)
            .is_some_and(|selector| position < selector.choices.len());
        if !in_range {
            return false;
        }

        let Some(selector) = open.remove(&anchor) else {
            return false;
        };
        let tab = selector.choices[position].clone();
        log::debug!("Selector at {}: picked tab {}", anchor.as_str(), tab.id);
        selector.reply.send(tab).is_ok()
    }

    /// Close the list at `anchor` without a pick
    pub fn dismiss(&self, anchor: ControlId) {
        if lock(&self.open).remove(&anchor).is_some() {
            log::debug!("Selector at {} dismissed", anchor.as_str());
        }
    }

    /// Close every open list, e.g. when the popup is torn down
    pub fn dismiss_all(&self) {
        lock(&self.open).clear();
    }
}

#[async_trait]
impl TabChooser for InlineSelector {
    async fn present_choices(&self, anchor: ControlId, tabs: Vec<Tab>) -> Option<Tab> {
        if tabs.is_empty() {
            log::debug!("Selector at {}: no tabs to offer", anchor.as_str());
            return None;
        }

        let (reply, choice) = oneshot::channel();
        let replaced = lock(&self.open).insert(
            anchor,
            OpenSelector {
                choices: tabs,
                reply,
            },
        );
        if let Some(previous) = replaced {
            drop(previous);
            log::debug!("Selector at {} rebuilt", anchor.as_str());
        }

        // A dropped sender (dismissed or replaced list) means no choice
        let mut wait = PendingChoice {
            selector: self,
            anchor,
            choice,
        };
        (&mut wait.choice).await.ok()
    }
}

/// Wait on an open list; closes the list if the wait is abandoned
struct PendingChoice<'a> {
    selector: &'a InlineSelector,
    anchor: ControlId,
    choice: oneshot::Receiver<Tab>,
}

impl Drop for PendingChoice<'_> {
    fn drop(&mut self) {
        self.choice.close();

        // Only this wait's list has a closed reply; a newer one is kept
        let mut open = lock(&self.selector.open);
        if open
            .get(&self.anchor)
            .is_some_and(|selector| selector.reply.is_closed())
        {
            open.remove(&self.anchor);
            log::debug!("Selector at {} abandoned", self.anchor.as_str());
        }
    }
}

/// Chooser that answers with a preset pick
///
/// Picks the offered tab with the preset id, or dismisses when there is
/// none. Records every offer for inspection.
#[derive(Debug, Default)]
pub struct ScriptedChooser {
    pick: Option<TabId>,
    offers: Mutex<Vec<(ControlId, Vec<TabId>)>>,
}

impl ScriptedChooser {
    pub fn picking(tab_id: TabId) -> Self {
        Self {
            pick: Some(tab_id),
            ..Default::default()
        }
    }

    pub fn dismissing() -> Self {
        Self::default()
    }

    /// Offers received so far: anchor and offered tab ids
    pub fn offers(&self) -> Vec<(ControlId, Vec<TabId>)> {
        lock(&self.offers).clone()
    }
}

#[async_trait]
impl TabChooser for ScriptedChooser {
    async fn present_choices(&self, anchor: ControlId, tabs: Vec<Tab>) -> Option<Tab> {
        lock(&self.offers).push((anchor, tabs.iter().map(|tab| tab.id).collect()));
        let pick = self.pick?;
        tabs.into_iter().find(|tab| tab.id == pick)
    }
}
