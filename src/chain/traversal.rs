//! Chain traversal
//!
//! Walks `child_uuid` links from a starting block and gathers every block it
//! passes, in chain order. Group selection, group moves and group deletion all
//! start from the set this produces.
//!
//! A dangling pointer or a revisited block means some earlier mutation broke
//! the chain invariants. Both are reported as errors; the walk never returns a
//! truncated family.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::warn;

use super::{BlockLookup, ChainError};
use crate::core::{Block, BlockId};

/// Ordered members of a chain, starting at the block the walk began on
pub type Family<'a> = IndexMap<BlockId, &'a Block>;

/// Collect `top` and all blocks reachable through its child links.
///
/// `top` itself does not have to be stored in `blocks`; its descendants do.
pub fn collect_family<'a, L>(top: &'a Block, blocks: &'a L) -> Result<Family<'a>, ChainError>
where
    L: BlockLookup + ?Sized,
{
    let mut family = Family::new();
    let mut current = top;

    loop {
        if family.contains_key(&current.uuid()) {
            warn!(top = %top.uuid(), revisited = %current.uuid(), "cyclic chain");
            return Err(ChainError::CyclicChain {
                revisited: current.uuid(),
            });
        }
        family.insert(current.uuid(), current);

        let Some(next) = current.child_uuid() else {
            break;
        };
        current = match blocks.get_block(&next) {
            Some(block) => block,
            None => {
                warn!(from = %current.uuid(), missing = %next, "broken chain");
                return Err(ChainError::BrokenChain {
                    from: current.uuid(),
                    missing: next,
                });
            }
        };
    }

    Ok(family)
}

/// Uuids of the family starting at the stored block `start`.
pub fn family_ids<L>(blocks: &L, start: BlockId) -> Result<Vec<BlockId>, ChainError>
where
    L: BlockLookup + ?Sized,
{
    let top = blocks
        .get_block(&start)
        .ok_or(ChainError::BlockNotFound(start))?;
    Ok(collect_family(top, blocks)?.into_keys().collect())
}

/// Head of the chain containing `id`, found by following parent links.
pub fn find_head<L>(blocks: &L, id: BlockId) -> Result<BlockId, ChainError>
where
    L: BlockLookup + ?Sized,
{
    let mut current = blocks.get_block(&id).ok_or(ChainError::BlockNotFound(id))?;
    let mut seen = HashSet::new();

    while let Some(parent) = current.parent_uuid() {
        if !seen.insert(current.uuid()) {
            warn!(start = %id, revisited = %current.uuid(), "cyclic chain");
            return Err(ChainError::CyclicChain {
                revisited: current.uuid(),
            });
        }
        current = match blocks.get_block(&parent) {
            Some(block) => block,
            None => {
                warn!(from = %current.uuid(), missing = %parent, "broken chain");
                return Err(ChainError::BrokenChain {
                    from: current.uuid(),
                    missing: parent,
                });
            }
        };
    }

    Ok(current.uuid())
}

/// Last block of the family starting at `start`.
pub fn chain_tail<L>(blocks: &L, start: BlockId) -> Result<BlockId, ChainError>
where
    L: BlockLookup + ?Sized,
{
    let ids = family_ids(blocks, start)?;
    // family_ids always contains `start`
    Ok(ids.last().copied().unwrap_or(start))
}
