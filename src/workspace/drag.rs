//! Drag sessions
//!
//! A drag lifts a sub-chain out of its chain, moves it around as a unit and,
//! on release, links it under whichever block it was dropped near.

use tracing::{debug, trace};

use super::{Workspace, WorkspaceError};
use crate::chain::{self, splice::Attachment, ChainError};
use crate::core::{Block, BlockId, Position};

/// State of one drag gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    block: BlockId,
    members: Vec<BlockId>,
    detached_from: Option<BlockId>,
    snap_target: Option<BlockId>,
}

impl DragSession {
    /// The block the gesture grabbed
    pub fn block(&self) -> BlockId {
        self.block
    }

    /// Everything moving with the grabbed block, in chain order
    pub fn members(&self) -> &[BlockId] {
        &self.members
    }

    /// Parent the family was lifted off, if it had one
    pub fn detached_from(&self) -> Option<BlockId> {
        self.detached_from
    }

    /// Block the family would snap under if released now
    pub fn snap_target(&self) -> Option<BlockId> {
        self.snap_target
    }
}

impl Workspace {
    /// Start dragging `id` together with everything below it.
    pub fn begin_drag(&mut self, id: BlockId) -> Result<DragSession, WorkspaceError> {
        let block = self.blocks.get(&id).ok_or(ChainError::BlockNotFound(id))?;
        if block.is_sample() {
            return Err(WorkspaceError::SampleBlock(id));
        }
        let detached_from = chain::detach(&mut self.blocks, id)?;
        let members = chain::family_ids(&self.blocks, id)?;
        debug!(block = %id, members = members.len(), "drag started");
        Ok(DragSession {
            block: id,
            members,
            detached_from,
            snap_target: None,
        })
    }

    /// Move the dragged family so the grabbed block sits at `position`.
    ///
    /// Returns the block it would currently snap under.
    pub fn drag_to(
        &mut self,
        session: &mut DragSession,
        position: Position,
    ) -> Result<Option<BlockId>, WorkspaceError> {
        let current = self
            .blocks
            .get(&session.block)
            .ok_or(ChainError::BlockNotFound(session.block))?
            .position;
        let (dx, dy) = current.delta_to(position);
        self.translate(&session.members, dx, dy);

        let target = self.snap_target_for(session)?;
        if target != session.snap_target {
            trace!(block = %session.block, target = ?target, "snap target changed");
        }
        session.snap_target = target;
        Ok(target)
    }

    /// Release the drag, attaching the family under the snap target if any.
    ///
    /// A broken chain below the target rejects the drop before anything is
    /// linked; the family stays where it was released.
    pub fn end_drag(&mut self, session: DragSession) -> Result<Option<Attachment>, WorkspaceError> {
        let Some(parent) = session.snap_target else {
            debug!(block = %session.block, "drag ended unattached");
            return Ok(None);
        };
        chain::family_ids(&self.blocks, parent)?;
        let attachment = chain::attach(&mut self.blocks, parent, session.block)?;
        self.align_below(parent)?;
        debug!(block = %session.block, parent = %parent, "drag ended attached");
        Ok(Some(attachment))
    }

    fn snap_target_for(&self, session: &DragSession) -> Result<Option<BlockId>, WorkspaceError> {
        let dragged = self
            .blocks
            .get(&session.block)
            .ok_or(ChainError::BlockNotFound(session.block))?;
        if dragged.kind().is_hat() {
            return Ok(None);
        }

        let proximity = &self.config.proximity;
        let slot = |candidate: &Block| candidate.position.offset(0.0, self.config.block_height);
        let target = self
            .blocks
            .values()
            .filter(|candidate| self.can_snap_under(candidate, dragged, &session.members))
            .filter(|candidate| proximity.is_nearby(candidate.position, dragged.position))
            .map(|candidate| (slot(candidate).distance_squared(dragged.position), candidate.uuid()))
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, id)| id);
        Ok(target)
    }

    fn can_snap_under(&self, candidate: &Block, dragged: &Block, members: &[BlockId]) -> bool {
        !members.contains(&candidate.uuid())
            && !candidate.is_sample()
            && !candidate.shadow
            && candidate.tab_uuid() == dragged.tab_uuid()
    }

    /// Stack the family below `parent` at `block_height` pitch.
    fn align_below(&mut self, parent: BlockId) -> Result<(), WorkspaceError> {
        let origin = self
            .blocks
            .get(&parent)
            .ok_or(ChainError::BlockNotFound(parent))?
            .position;
        let pitch = self.config.block_height;
        let family = chain::family_ids(&self.blocks, parent)?;
        for (step, id) in family.iter().enumerate().skip(1) {
            if let Some(block) = self.blocks.get_mut(id) {
                block.position = origin.offset(0.0, pitch * step as f64);
            }
        }
        Ok(())
    }
}
