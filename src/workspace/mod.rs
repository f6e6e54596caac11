//! Block workspace
//!
//! A [`Workspace`] owns one canvas worth of blocks together with the kind
//! registry, the id generator and the editor config. Every structural change
//! goes through the chain operations, so the collection stays consistent
//! between calls.

pub mod drag;
pub mod validation;

use tracing::debug;

use crate::categories::BlockKind;
use crate::chain::splice::Attachment;
use crate::chain::{self, Blocks, ChainError};
use crate::config::EditorConfig;
use crate::core::{Block, BlockContext, BlockError, BlockId, IdGenerator, KindRegistry, Position, TabId};

pub use drag::DragSession;
pub use validation::{ChainValidationResult, ChainValidator, ValidationIssue};

/// Workspace errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Block(#[from] BlockError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("Duplicate block ID: {0}")]
    DuplicateBlock(BlockId),

    /// Palette samples are templates and cannot be moved or linked
    #[error("Block {0} is a sample and cannot be edited")]
    SampleBlock(BlockId),

    /// Samples live in the palette, outside every tab
    #[error("Sample block {block} cannot belong to tab {tab}")]
    SampleInTab { block: BlockId, tab: TabId },
}

/// Blocks of one canvas plus everything needed to create and link them
#[derive(Debug)]
pub struct Workspace {
    blocks: Blocks,
    registry: KindRegistry,
    ids: IdGenerator,
    config: EditorConfig,
}

impl Workspace {
    /// Empty workspace with the built-in kinds and an OS-seeded id generator
    pub fn new(config: EditorConfig) -> Self {
        Self::with_parts(config, KindRegistry::with_builtin_kinds(), IdGenerator::new())
    }

    pub fn with_parts(config: EditorConfig, registry: KindRegistry, ids: IdGenerator) -> Self {
        Self {
            blocks: Blocks::new(),
            registry,
            ids,
            config,
        }
    }

    pub fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    /// Position, shadow state and payload are editable; chain pointers are not.
    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.get_mut(&id)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// Shared generator, so tabs and clips draw from the same source
    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Create a new unlinked block with a fresh uuid.
    pub fn add_block(
        &mut self,
        kind: BlockKind,
        position: Position,
        tab: Option<TabId>,
    ) -> Result<BlockId, WorkspaceError> {
        let uuid: BlockId = self.ids.mint();
        let mut context = BlockContext::new(kind, uuid).at(position);
        context.tab_uuid = tab;
        self.insert_block(context)
    }

    /// Create a palette sample of `kind`.
    pub fn add_sample(&mut self, kind: BlockKind, position: Position) -> Result<BlockId, WorkspaceError> {
        let uuid: BlockId = self.ids.mint();
        self.insert_block(BlockContext::new(kind, uuid).at(position).sample())
    }

    /// Insert a block built from `context`, minting a uuid if it has none.
    ///
    /// Restored chain pointers are taken as given; run [`Workspace::validate`]
    /// once a whole project has been loaded.
    pub fn insert_block(&mut self, mut context: BlockContext) -> Result<BlockId, WorkspaceError> {
        if context.uuid.is_none() {
            context.uuid = Some(self.ids.mint());
        }
        let block = Block::new(context, &self.registry)?;
        let uuid = block.uuid();
        if self.blocks.contains_key(&uuid) {
            return Err(WorkspaceError::DuplicateBlock(uuid));
        }
        if let (true, Some(tab)) = (block.is_sample(), block.tab_uuid()) {
            return Err(WorkspaceError::SampleInTab { block: uuid, tab });
        }
        debug!(block = %uuid, kind = %block.kind(), "block added");
        self.blocks.insert(uuid, block);
        Ok(uuid)
    }

    /// Remove one block, closing the gap it leaves in its chain.
    pub fn remove_block(&mut self, id: BlockId) -> Result<Block, WorkspaceError> {
        chain::splice_out(&mut self.blocks, id)?;
        let block = self
            .blocks
            .remove(&id)
            .ok_or(ChainError::BlockNotFound(id))?;
        debug!(block = %id, "block removed");
        Ok(block)
    }

    /// Remove the whole chain containing `id`, head to tail.
    pub fn remove_chain(&mut self, id: BlockId) -> Result<Vec<Block>, WorkspaceError> {
        let members = self.chain_of(id)?;
        let removed: Vec<Block> = members
            .iter()
            .filter_map(|member| self.blocks.remove(member))
            .collect();
        debug!(block = %id, removed = removed.len(), "chain removed");
        Ok(removed)
    }

    pub fn attach(&mut self, parent: BlockId, child: BlockId) -> Result<Attachment, WorkspaceError> {
        for id in [parent, child] {
            if self.blocks.get(&id).is_some_and(Block::is_sample) {
                return Err(WorkspaceError::SampleBlock(id));
            }
        }
        Ok(chain::attach(&mut self.blocks, parent, child)?)
    }

    pub fn detach(&mut self, child: BlockId) -> Result<Option<BlockId>, WorkspaceError> {
        Ok(chain::detach(&mut self.blocks, child)?)
    }

    /// `id` and everything below it, in chain order.
    pub fn family(&self, id: BlockId) -> Result<Vec<BlockId>, WorkspaceError> {
        Ok(chain::family_ids(&self.blocks, id)?)
    }

    /// The whole chain containing `id`, starting at its head.
    pub fn chain_of(&self, id: BlockId) -> Result<Vec<BlockId>, WorkspaceError> {
        let head = chain::find_head(&self.blocks, id)?;
        Ok(chain::family_ids(&self.blocks, head)?)
    }

    /// Shift the whole chain containing `id` by `(dx, dy)`.
    pub fn move_chain(&mut self, id: BlockId, dx: f64, dy: f64) -> Result<Vec<BlockId>, WorkspaceError> {
        let members = self.chain_of(id)?;
        self.translate(&members, dx, dy);
        Ok(members)
    }

    fn translate(&mut self, members: &[BlockId], dx: f64, dy: f64) {
        for member in members {
            if let Some(block) = self.blocks.get_mut(member) {
                block.translate(dx, dy);
            }
        }
    }

    /// Blocks created in `tab`
    pub fn blocks_in_tab(&self, tab: TabId) -> impl Iterator<Item = &Block> {
        self.blocks.values().filter(move |b| b.tab_uuid() == Some(tab))
    }

    pub fn validate(&self) -> ChainValidationResult {
        ChainValidator::validate(&self.blocks)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
