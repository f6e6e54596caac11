//! Attach, detach and splice-out
//!
//! These are the only operations that rewrite chain pointers. Each one reads
//! and checks everything it needs first, then writes every affected pointer
//! (including `top_uuid` of every re-homed block) before returning.

use tracing::{debug, warn};

use super::traversal::{family_ids, find_head};
use super::{Blocks, ChainError};
use crate::core::{Block, BlockId};

/// What an [`attach`] changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Head of the chain the child now belongs to
    pub head: BlockId,
    /// The attached family, in chain order
    pub moved: Vec<BlockId>,
    /// Former successor of the parent, now hanging below the moved tail
    pub displaced: Option<BlockId>,
}

fn block_mut(blocks: &mut Blocks, id: BlockId) -> Result<&mut Block, ChainError> {
    blocks.get_mut(&id).ok_or(ChainError::BlockNotFound(id))
}

/// Link the chain headed by `child` directly below `parent`.
///
/// If `parent` already has a successor, the child's whole family is inserted
/// between the two. Fails without touching anything if `child` is not a chain
/// head, is a hat block, or if `parent` belongs to the child's own family.
pub fn attach(blocks: &mut Blocks, parent_id: BlockId, child_id: BlockId) -> Result<Attachment, ChainError> {
    if parent_id == child_id {
        return Err(ChainError::WouldCycle {
            parent: parent_id,
            child: child_id,
        });
    }

    let displaced = blocks
        .get(&parent_id)
        .ok_or(ChainError::BlockNotFound(parent_id))?
        .child_uuid();
    let child = blocks.get(&child_id).ok_or(ChainError::BlockNotFound(child_id))?;
    if child.kind().is_hat() {
        return Err(ChainError::HeadOnly(child_id));
    }
    if let Some(existing) = child.parent_uuid() {
        return Err(ChainError::AlreadyAttached {
            child: child_id,
            parent: existing,
        });
    }

    let moved = family_ids(&*blocks, child_id)?;
    if moved.contains(&parent_id) {
        return Err(ChainError::WouldCycle {
            parent: parent_id,
            child: child_id,
        });
    }
    if let Some(next) = displaced {
        if !blocks.contains_key(&next) {
            return Err(ChainError::BrokenChain {
                from: parent_id,
                missing: next,
            });
        }
    }
    let head = find_head(&*blocks, parent_id)?;
    let tail = moved.last().copied().unwrap_or(child_id);

    block_mut(blocks, parent_id)?.child_uuid = Some(child_id);
    block_mut(blocks, child_id)?.parent_uuid = Some(parent_id);
    if let Some(next) = displaced {
        block_mut(blocks, tail)?.child_uuid = Some(next);
        block_mut(blocks, next)?.parent_uuid = Some(tail);
    }
    for id in &moved {
        block_mut(blocks, *id)?.top_uuid = head;
    }

    debug!(parent = %parent_id, child = %child_id, head = %head, moved = moved.len(), "attached");
    Ok(Attachment {
        head,
        moved,
        displaced,
    })
}

/// Cut the link above `child`, making it the head of its own family.
///
/// Returns the former parent, or `None` if `child` already was a head.
pub fn detach(blocks: &mut Blocks, child_id: BlockId) -> Result<Option<BlockId>, ChainError> {
    let child = blocks.get(&child_id).ok_or(ChainError::BlockNotFound(child_id))?;
    let Some(parent_id) = child.parent_uuid() else {
        return Ok(None);
    };
    if !blocks.contains_key(&parent_id) {
        return Err(ChainError::BrokenChain {
            from: child_id,
            missing: parent_id,
        });
    }
    if blocks[&parent_id].child_uuid() != Some(child_id) {
        warn!(parent = %parent_id, child = %child_id, "parent does not link back to child");
        return Err(ChainError::AsymmetricLink {
            parent: parent_id,
            child: child_id,
        });
    }
    let moved = family_ids(&*blocks, child_id)?;

    block_mut(blocks, parent_id)?.child_uuid = None;
    block_mut(blocks, child_id)?.parent_uuid = None;
    for id in &moved {
        block_mut(blocks, *id)?.top_uuid = child_id;
    }

    debug!(parent = %parent_id, child = %child_id, moved = moved.len(), "detached");
    Ok(Some(parent_id))
}

/// Unlink the single block `id` from its chain, closing the gap.
///
/// The parent (if any) is joined to the successor (if any). When the removed
/// block was the head, the successor becomes the new head. The block itself
/// is left isolated in the collection for the caller to remove.
pub fn splice_out(blocks: &mut Blocks, id: BlockId) -> Result<(), ChainError> {
    let block = blocks.get(&id).ok_or(ChainError::BlockNotFound(id))?;
    let parent = block.parent_uuid();
    let next = block.child_uuid();

    for linked in parent.iter().chain(next.iter()) {
        if !blocks.contains_key(linked) {
            return Err(ChainError::BrokenChain {
                from: id,
                missing: *linked,
            });
        }
    }
    let promoted = match (parent, next) {
        (None, Some(next)) => family_ids(&*blocks, next)?,
        _ => Vec::new(),
    };

    if let Some(parent) = parent {
        block_mut(blocks, parent)?.child_uuid = next;
    }
    if let Some(next) = next {
        block_mut(blocks, next)?.parent_uuid = parent;
        for member in &promoted {
            block_mut(blocks, *member)?.top_uuid = next;
        }
    }
    let block = block_mut(blocks, id)?;
    block.parent_uuid = None;
    block.child_uuid = None;
    block.top_uuid = id;

    debug!(block = %id, "spliced out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::BlockKind;
    use crate::core::{BlockContext, IdGenerator, KindRegistry};

    struct Fixture {
        blocks: Blocks,
        ids: IdGenerator,
        registry: KindRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                blocks: Blocks::new(),
                ids: IdGenerator::seeded(3),
                registry: KindRegistry::with_builtin_kinds(),
            }
        }

        fn add(&mut self, kind: BlockKind) -> BlockId {
            let id = self.ids.mint();
            let block = Block::new(BlockContext::new(kind, id), &self.registry).unwrap();
            self.blocks.insert(id, block);
            id
        }

        fn top(&self, id: BlockId) -> BlockId {
            self.blocks[&id].top_uuid()
        }

        fn parent(&self, id: BlockId) -> Option<BlockId> {
            self.blocks[&id].parent_uuid()
        }

        fn child(&self, id: BlockId) -> Option<BlockId> {
            self.blocks[&id].child_uuid()
        }
    }

    #[test]
    fn test_attach_links_both_ways_and_propagates_top() {
        let mut fx = Fixture::new();
        let a = fx.add(BlockKind::MovieLoading);
        let b = fx.add(BlockKind::GrayScaleFilter);
        let c = fx.add(BlockKind::Debug);
        attach(&mut fx.blocks, b, c).unwrap();
        assert_eq!(fx.top(c), b);

        let attachment = attach(&mut fx.blocks, a, b).unwrap();
        assert_eq!(attachment.head, a);
        assert_eq!(attachment.moved, vec![b, c]);
        assert_eq!(attachment.displaced, None);

        assert_eq!(fx.child(a), Some(b));
        assert_eq!(fx.parent(b), Some(a));
        assert_eq!(fx.top(b), a);
        assert_eq!(fx.top(c), a);
    }

    #[test]
    fn test_attach_inserts_between_parent_and_successor() {
        let mut fx = Fixture::new();
        let a = fx.add(BlockKind::MovieLoading);
        let c = fx.add(BlockKind::Debug);
        let x = fx.add(BlockKind::BlurFilter);
        let y = fx.add(BlockKind::GrayScaleFilter);
        attach(&mut fx.blocks, a, c).unwrap();
        attach(&mut fx.blocks, x, y).unwrap();

        let attachment = attach(&mut fx.blocks, a, x).unwrap();
        assert_eq!(attachment.displaced, Some(c));
        assert_eq!(family_ids(&fx.blocks, a).unwrap(), vec![a, x, y, c]);
        assert_eq!(fx.parent(c), Some(y));
        for id in [x, y, c] {
            assert_eq!(fx.top(id), a);
        }
    }

    #[test]
    fn test_attach_rejects_non_head_child() {
        let mut fx = Fixture::new();
        let a = fx.add(BlockKind::Debug);
        let b = fx.add(BlockKind::Debug);
        let c = fx.add(BlockKind::Debug);
        attach(&mut fx.blocks, a, b).unwrap();
        let before = fx.blocks.clone();

        let err = attach(&mut fx.blocks, c, b).unwrap_err();
        assert_eq!(err, ChainError::AlreadyAttached { child: b, parent: a });
        assert_eq!(fx.blocks, before);
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let mut fx = Fixture::new();
        let a = fx.add(BlockKind::Debug);
        let b = fx.add(BlockKind::Debug);
        attach(&mut fx.blocks, a, b).unwrap();
        let before = fx.blocks.clone();

        assert_eq!(
            attach(&mut fx.blocks, b, a).unwrap_err(),
            ChainError::WouldCycle { parent: b, child: a }
        );
        assert_eq!(
            attach(&mut fx.blocks, a, a).unwrap_err(),
            ChainError::WouldCycle { parent: a, child: a }
        );
        assert_eq!(fx.blocks, before);
    }

    #[test]
    fn test_hat_block_cannot_become_child() {
        let mut fx = Fixture::new();
        let a = fx.add(BlockKind::Debug);
        let hat = fx.add(BlockKind::DefineComponent);
        assert_eq!(attach(&mut fx.blocks, a, hat).unwrap_err(), ChainError::HeadOnly(hat));
        // a hat can still be a parent
        attach(&mut fx.blocks, hat, a).unwrap();
        assert_eq!(fx.top(a), hat);
    }

    #[test]
    fn test_detach_retops_the_tail() {
        let mut fx = Fixture::new();
        let a = fx.add(BlockKind::Debug);
        let b = fx.add(BlockKind::Debug);
        let c = fx.add(BlockKind::Debug);
        attach(&mut fx.blocks, b, c).unwrap();
        attach(&mut fx.blocks, a, b).unwrap();

        assert_eq!(detach(&mut fx.blocks, b).unwrap(), Some(a));
        assert_eq!(fx.child(a), None);
        assert_eq!(fx.parent(b), None);
        assert_eq!(fx.top(b), b);
        assert_eq!(fx.top(c), b);
        assert_eq!(fx.top(a), a);
    }

    #[test]
    fn test_attach_over_dangling_successor_changes_nothing() {
        let mut fx = Fixture::new();
        let a = fx.add(BlockKind::MovieLoading);
        let b = fx.add(BlockKind::Debug);
        let ghost: BlockId = fx.ids.mint();
        fx.blocks.get_mut(&a).unwrap().child_uuid = Some(ghost);
        let before = fx.blocks.clone();

        assert_eq!(
            attach(&mut fx.blocks, a, b).unwrap_err(),
            ChainError::BrokenChain { from: a, missing: ghost }
        );
        assert_eq!(fx.blocks, before);
    }

    #[test]
    fn test_detach_rejects_one_sided_link() {
        let mut fx = Fixture::new();
        let a = fx.add(BlockKind::Debug);
        let b = fx.add(BlockKind::Debug);
        fx.blocks.get_mut(&b).unwrap().parent_uuid = Some(a);
        fx.blocks.get_mut(&b).unwrap().top_uuid = a;
        let before = fx.blocks.clone();

        assert_eq!(
            detach(&mut fx.blocks, b).unwrap_err(),
            ChainError::AsymmetricLink { parent: a, child: b }
        );
        assert_eq!(fx.blocks, before);
    }

    #[test]
    fn test_detach_head_is_noop() {
        let mut fx = Fixture::new();
        let a = fx.add(BlockKind::Debug);
        let before = fx.blocks.clone();
        assert_eq!(detach(&mut fx.blocks, a).unwrap(), None);
        assert_eq!(fx.blocks, before);
    }

    #[test]
    fn test_splice_out_middle_joins_neighbours() {
        let mut fx = Fixture::new();
        let a = fx.add(BlockKind::Debug);
        let b = fx.add(BlockKind::Debug);
        let c = fx.add(BlockKind::Debug);
        attach(&mut fx.blocks, b, c).unwrap();
        attach(&mut fx.blocks, a, b).unwrap();

        splice_out(&mut fx.blocks, b).unwrap();
        assert_eq!(fx.child(a), Some(c));
        assert_eq!(fx.parent(c), Some(a));
        assert_eq!(fx.top(c), a);
        assert!(fx.blocks[&b].is_head() && fx.blocks[&b].is_terminal());
    }

    #[test]
    fn test_splice_out_head_promotes_successor() {
        let mut fx = Fixture::new();
        let a = fx.add(BlockKind::Debug);
        let b = fx.add(BlockKind::Debug);
        let c = fx.add(BlockKind::Debug);
        attach(&mut fx.blocks, b, c).unwrap();
        attach(&mut fx.blocks, a, b).unwrap();

        splice_out(&mut fx.blocks, a).unwrap();
        assert_eq!(fx.parent(b), None);
        assert_eq!(fx.top(b), b);
        assert_eq!(fx.top(c), b);
    }
}
