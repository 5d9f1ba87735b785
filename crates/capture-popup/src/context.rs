//! Popup context
//!
//! Computed once when the popup opens and read-only afterwards.
//!
//! The popup is either a prompt (the toolbar dropdown, which is not a tab)
//! or a page opened in a real tab (e.g. on mobile browsers, or when the
//! user visits the popup URL directly). The *target tab* is the tab the
//! popup's commands act on by default:
//! - prompt: the active tab of the current window
//! - page in a tab: the active tab, if it is some other tab than the popup's
//!   own; otherwise there is none and the user picks tabs explicitly

use crate::error::Result;
use capture_host::{PermissionService, Tab, TabQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContext {
    is_prompt: bool,
    target_tab: Option<Tab>,
    allow_file_access: bool,
}

impl PopupContext {
    pub fn new(is_prompt: bool, target_tab: Option<Tab>, allow_file_access: bool) -> Self {
        Self {
            is_prompt,
            target_tab,
            allow_file_access,
        }
    }

    /// Query the host and derive the context
    ///
    /// The three host queries are independent and run concurrently.
    pub async fn detect(tabs: &dyn TabQuery, permissions: &dyn PermissionService) -> Result<Self> {
        let (current, active, allow_file_access) = tokio::try_join!(
            tabs.current_tab(),
            tabs.active_tab(),
            permissions.is_file_access_allowed(),
        )?;

        let is_prompt = current.is_none();
        let target_tab = match (&current, active) {
            (None, active) => active,
            (Some(own), Some(active)) if active.id != own.id => Some(active),
            (Some(_), _) => None,
        };

        log::debug!(
            "Popup context: prompt={}, target tab={:?}, file access={}",
            is_prompt,
            target_tab.as_ref().map(|tab| tab.id),
            allow_file_access
        );

        Ok(Self::new(is_prompt, target_tab, allow_file_access))
    }

    /// Whether the popup is a prompt rather than a page in a tab
    pub fn is_prompt(&self) -> bool {
        self.is_prompt
    }

    pub fn target_tab(&self) -> Option<&Tab> {
        self.target_tab.as_ref()
    }

    pub fn allow_file_access(&self) -> bool {
        self.allow_file_access
    }
}
