//! Popup error type

use thiserror::Error;

/// Errors surfaced by the popup controller
///
/// A dismissed tab selector is not an error; it resolves to "no target"
/// and nothing is dispatched.
#[derive(Debug, Error)]
pub enum PopupError {
    /// A host service (tab query, capture, options) rejected the request
    #[error("host request failed: {0:#}")]
    Host(#[from] anyhow::Error),

    /// A drag was started while the popup has no target tab
    #[error("no target tab: the popup is not attached to a browser tab")]
    NoTargetTab,

    /// Structured drag data could not be encoded or decoded
    #[error("invalid drag payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Plain-text drag data did not carry a tab id
    #[error("invalid tab id in plain-text drag data: {0:?}")]
    InvalidPlainText(String),
}

pub type Result<T> = std::result::Result<T, PopupError>;
