//! Tabbed, history-aware navigation
//!
//! Each [`Tab`] owns exactly one [`History`]: an ordered log of visited pages
//! and a cursor. Back and forward clamp at the ends instead of failing, and
//! visiting a page while the cursor is not at the end discards the forward
//! branch, like browser history.

pub mod history;
pub mod tab;

pub use history::{History, HistoryEntry, HistoryKind};
pub use tab::{Tab, Tabs};

use crate::core::TabId;

/// Navigation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavigationError {
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    /// A page action arrived while no tab is selected
    #[error("No tab is currently being viewed")]
    NoCurrentTab,

    /// Restored history whose cursor does not point at an entry
    #[error("History cursor {index} out of range for {len} entries")]
    CursorOutOfRange { index: usize, len: usize },
}
