//! Chain model: proximity, traversal and pointer splicing
//!
//! Blocks live in a keyed collection owned by the caller. Traversal only needs
//! read access through [`BlockLookup`]; the splice operations take the
//! collection mutably and rewrite every affected pointer in one step, after
//! all checks have passed, so no reader ever sees a half-applied attach.

pub mod proximity;
pub mod splice;
pub mod traversal;

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::core::{Block, BlockId};

pub use proximity::{is_nearby, ProximityThresholds};
pub use splice::{attach, detach, splice_out};
pub use traversal::{collect_family, family_ids, find_head, Family};

/// Keyed block collection as held by the store
pub type Blocks = HashMap<BlockId, Block>;

/// Read access to blocks by uuid
pub trait BlockLookup {
    fn get_block(&self, id: &BlockId) -> Option<&Block>;
}

impl BlockLookup for HashMap<BlockId, Block> {
    fn get_block(&self, id: &BlockId) -> Option<&Block> {
        self.get(id)
    }
}

impl BlockLookup for IndexMap<BlockId, Block> {
    fn get_block(&self, id: &BlockId) -> Option<&Block> {
        self.get(id)
    }
}

/// Chain consistency and mutation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChainError {
    /// Operation named a block that is not in the collection
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    /// A chain pointer refers to a block that is not in the collection
    #[error("Broken chain: {from} points to missing block {missing}")]
    BrokenChain { from: BlockId, missing: BlockId },

    /// Traversal came back to a block it had already visited
    #[error("Cyclic chain: block {revisited} reached twice")]
    CyclicChain { revisited: BlockId },

    /// Only a chain head can be attached under another block
    #[error("Block {child} is already attached under {parent}")]
    AlreadyAttached { child: BlockId, parent: BlockId },

    /// Attaching would make a chain its own descendant
    #[error("Attaching {child} under {parent} would create a cycle")]
    WouldCycle { parent: BlockId, child: BlockId },

    /// Child names a parent whose `child_uuid` points elsewhere
    #[error("Asymmetric link: {child} names {parent} as parent, but not the other way round")]
    AsymmetricLink { parent: BlockId, child: BlockId },

    /// Hat blocks only ever start a chain
    #[error("Block {0} can only be a chain head")]
    HeadOnly(BlockId),
}
