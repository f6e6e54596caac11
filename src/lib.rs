//! Block Canvas - chain model for a node/block visual editor
//!
//! This crate provides the block entity and its parent/child/top linkage,
//! proximity snapping, chain traversal, per-tab browsing history and the
//! small amount of store glue (workspace, components, clips) around them.

pub mod categories;
pub mod chain;
pub mod config;
pub mod core;
pub mod navigation;
pub mod project;
pub mod workspace;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use categories::{BlockKind, BlockPayload};
pub use chain::{collect_family, is_nearby, ChainError, ProximityThresholds};
pub use config::EditorConfig;
pub use core::{Block, BlockContext, BlockId, IdGenerator, KindRegistry, Position};
pub use navigation::{History, HistoryKind, Tabs};
pub use workspace::{DragSession, Workspace, WorkspaceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
