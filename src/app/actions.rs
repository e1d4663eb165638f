//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler mutates [`AppState`](crate::app::AppState) directly and
//! only returns an [`Action`] for effects that need the Zellij host, which the
//! library deliberately does not link against.

/// Commands for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly asks to leave (pressing `q` while browsing).
    CloseFocus,
}
