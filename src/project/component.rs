//! Reusable block groups

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ProjectError;
use crate::chain::{self, BlockLookup, Blocks, ChainError, Family};
use crate::core::{Block, BlockId, ComponentId, IdGenerator};

/// A named, reusable group of blocks
///
/// `export_blocks` are the component's externally visible interface. They
/// belong to the same chain set as `blocks`, so lookups and traversals see
/// both maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub uuid: ComponentId,
    pub name: String,
    pub default_name: String,
    pub blocks: Blocks,
    pub export_blocks: Blocks,
}

impl Component {
    pub fn new(uuid: ComponentId, default_name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: String::new(),
            default_name: default_name.into(),
            blocks: Blocks::new(),
            export_blocks: Blocks::new(),
        }
    }

    /// User-given name, or the default name while none is set
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.default_name
        } else {
            &self.name
        }
    }

    /// Family starting at `start`, resolved across both block maps.
    pub fn family(&self, start: BlockId) -> Result<Family<'_>, ChainError> {
        let top = self
            .get_block(&start)
            .ok_or(ChainError::BlockNotFound(start))?;
        chain::collect_family(top, self)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len() + self.export_blocks.len()
    }
}

impl BlockLookup for Component {
    fn get_block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.get(id).or_else(|| self.export_blocks.get(id))
    }
}

/// All components, in creation order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    components: IndexMap<ComponentId, Component>,
    /// Components ever created here; never decreases, so default names stay unique
    #[serde(default)]
    created: usize,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty component named "Component N", N counting from 1.
    ///
    /// N keeps counting after removals.
    pub fn create(&mut self, ids: &mut IdGenerator) -> ComponentId {
        let uuid: ComponentId = ids.mint();
        self.created += 1;
        let default_name = format!("Component {}", self.created);
        self.components.insert(uuid, Component::new(uuid, default_name));
        debug!(component = %uuid, "component created");
        uuid
    }

    pub fn insert(&mut self, component: Component) {
        self.components.insert(component.uuid, component);
    }

    pub fn get(&self, uuid: ComponentId) -> Result<&Component, ProjectError> {
        self.components
            .get(&uuid)
            .ok_or(ProjectError::ComponentNotFound(uuid))
    }

    pub fn get_mut(&mut self, uuid: ComponentId) -> Result<&mut Component, ProjectError> {
        self.components
            .get_mut(&uuid)
            .ok_or(ProjectError::ComponentNotFound(uuid))
    }

    /// Set the user-given name; an empty name falls back to the default.
    pub fn rename(&mut self, uuid: ComponentId, name: impl Into<String>) -> Result<(), ProjectError> {
        self.get_mut(uuid)?.name = name.into();
        Ok(())
    }

    pub fn remove(&mut self, uuid: ComponentId) -> Result<Component, ProjectError> {
        self.components
            .shift_remove(&uuid)
            .ok_or(ProjectError::ComponentNotFound(uuid))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
