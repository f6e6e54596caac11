//! Block kinds and kind-specific payloads
//!
//! The kind enumeration is closed. A kind only decides how a block looks and
//! which payload it carries; chain traversal treats every kind alike.

pub mod component;
pub mod filter;
pub mod media;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::BlockError;

pub use component::DefineComponentPayload;
pub use filter::{GrayScaleFilterMode, GrayScaleFilterPayload};
pub use media::MovieLoadingPayload;

/// Block kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockKind {
    /// Prints whatever flows into it
    #[serde(rename = "DebugBlock")]
    Debug,
    /// Hat block naming a component; only ever a chain head
    #[serde(rename = "DefineComponentBlock")]
    DefineComponent,
    /// Loads a movie file
    #[serde(rename = "MovieLoadingBlock")]
    MovieLoading,
    /// Gray-scale filter
    #[serde(rename = "GrayScaleFilterBlock")]
    GrayScaleFilter,
    /// Blur filter
    #[serde(rename = "BlurFilterBlock")]
    BlurFilter,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Debug,
        BlockKind::DefineComponent,
        BlockKind::MovieLoading,
        BlockKind::GrayScaleFilter,
        BlockKind::BlurFilter,
    ];

    /// Name used on the wire and in persisted projects
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Debug => "DebugBlock",
            BlockKind::DefineComponent => "DefineComponentBlock",
            BlockKind::MovieLoading => "MovieLoadingBlock",
            BlockKind::GrayScaleFilter => "GrayScaleFilterBlock",
            BlockKind::BlurFilter => "BlurFilterBlock",
        }
    }

    /// Get a human-readable name for the kind
    pub fn display_name(&self) -> &'static str {
        match self {
            BlockKind::Debug => "Debug",
            BlockKind::DefineComponent => "Define Component",
            BlockKind::MovieLoading => "Movie Loading",
            BlockKind::GrayScaleFilter => "Gray Scale Filter",
            BlockKind::BlurFilter => "Blur Filter",
        }
    }

    /// Whether blocks of this kind can never have a parent
    pub fn is_hat(&self) -> bool {
        matches!(self, BlockKind::DefineComponent)
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BlockKind {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| BlockError::UnregisteredKind(s.to_string()))
    }
}

/// Kind-specific data carried by a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum BlockPayload {
    #[serde(rename = "DebugBlock")]
    Debug,
    #[serde(rename = "DefineComponentBlock")]
    DefineComponent(DefineComponentPayload),
    #[serde(rename = "MovieLoadingBlock")]
    MovieLoading(MovieLoadingPayload),
    #[serde(rename = "GrayScaleFilterBlock")]
    GrayScaleFilter(GrayScaleFilterPayload),
    #[serde(rename = "BlurFilterBlock")]
    BlurFilter,
}

impl BlockPayload {
    /// Empty payload for a freshly created block of `kind`
    pub fn for_kind(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Debug => BlockPayload::Debug,
            BlockKind::DefineComponent => BlockPayload::DefineComponent(Default::default()),
            BlockKind::MovieLoading => BlockPayload::MovieLoading(Default::default()),
            BlockKind::GrayScaleFilter => BlockPayload::GrayScaleFilter(Default::default()),
            BlockKind::BlurFilter => BlockPayload::BlurFilter,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            BlockPayload::Debug => BlockKind::Debug,
            BlockPayload::DefineComponent(_) => BlockKind::DefineComponent,
            BlockPayload::MovieLoading(_) => BlockKind::MovieLoading,
            BlockPayload::GrayScaleFilter(_) => BlockKind::GrayScaleFilter,
            BlockPayload::BlurFilter => BlockKind::BlurFilter,
        }
    }
}
