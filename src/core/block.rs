//! Block entity and construction
//!
//! A [`Block`] is one node of a visual chain. Its identity, kind and
//! appearance are fixed at construction; its position is free to change; its
//! chain pointers are only rewritten by the operations in [`crate::chain`],
//! which keep the chain invariants intact:
//!
//! - following `child_uuid` links terminates and never revisits a block
//! - every member's `top_uuid` is the uuid of the chain head
//! - `a.child_uuid == Some(b.uuid)` iff `b.parent_uuid == Some(a.uuid)`

use serde::{Deserialize, Serialize};

use super::appearance::BlockAppearance;
use super::registry::KindRegistry;
use super::{BlockId, Position, TabId};
use crate::categories::{BlockKind, BlockPayload};

/// Everything needed to construct a block
///
/// Fresh blocks usually only set `kind`, `uuid`, `position` and `tab_uuid`.
/// Blocks restored from a persisted project also carry their chain pointers
/// and payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockContext {
    pub name: String,
    pub kind: Option<BlockKind>,
    pub uuid: Option<BlockId>,
    pub top_uuid: Option<BlockId>,
    pub parent_uuid: Option<BlockId>,
    pub child_uuid: Option<BlockId>,
    pub shadow: bool,
    pub position: Position,
    pub tab_uuid: Option<TabId>,
    pub is_sample: bool,
    pub payload: Option<BlockPayload>,
}

impl BlockContext {
    pub fn new(kind: BlockKind, uuid: BlockId) -> Self {
        Self {
            name: kind.display_name().to_string(),
            kind: Some(kind),
            uuid: Some(uuid),
            ..Default::default()
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn in_tab(mut self, tab: TabId) -> Self {
        self.tab_uuid = Some(tab);
        self
    }

    pub fn sample(mut self) -> Self {
        self.is_sample = true;
        self
    }

    /// Restore previously persisted chain pointers.
    pub fn linked(
        mut self,
        top: BlockId,
        parent: Option<BlockId>,
        child: Option<BlockId>,
    ) -> Self {
        self.top_uuid = Some(top);
        self.parent_uuid = parent;
        self.child_uuid = child;
        self
    }

    pub fn with_payload(mut self, payload: BlockPayload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// A node in a visual chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    name: String,
    uuid: BlockId,
    pub(crate) top_uuid: BlockId,
    pub(crate) parent_uuid: Option<BlockId>,
    pub(crate) child_uuid: Option<BlockId>,
    /// Ghost rendering state while a drop target is previewed
    pub shadow: bool,
    pub position: Position,
    tab_uuid: Option<TabId>,
    is_sample: bool,
    shadow_path: String,
    #[serde(flatten)]
    appearance: BlockAppearance,
    payload: BlockPayload,
}

impl Block {
    /// Construct a block, resolving its appearance from `registry`.
    ///
    /// Fails with [`BlockError::UnregisteredKind`] if the context has no kind
    /// or the kind is not in the registry. Nothing is built on failure.
    pub fn new(context: BlockContext, registry: &KindRegistry) -> Result<Self, BlockError> {
        let kind = context
            .kind
            .ok_or_else(|| BlockError::UnregisteredKind("<none>".to_string()))?;
        let appearance = registry
            .appearance(kind)
            .ok_or_else(|| BlockError::UnregisteredKind(kind.name().to_string()))?;
        let uuid = context.uuid.ok_or(BlockError::MissingField("uuid"))?;

        let payload = match context.payload {
            Some(payload) if payload.kind() != kind => {
                return Err(BlockError::PayloadMismatch {
                    kind,
                    payload: payload.kind(),
                })
            }
            Some(payload) => payload,
            None => BlockPayload::for_kind(kind),
        };

        Ok(Self {
            name: context.name,
            uuid,
            top_uuid: context.top_uuid.unwrap_or(uuid),
            parent_uuid: context.parent_uuid,
            child_uuid: context.child_uuid,
            shadow: context.shadow,
            position: context.position,
            tab_uuid: context.tab_uuid,
            is_sample: context.is_sample,
            shadow_path: String::new(),
            appearance,
            payload,
        })
    }

    pub fn uuid(&self) -> BlockId {
        self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BlockKind {
        self.payload.kind()
    }

    /// Uuid of the head of the chain this block belongs to
    pub fn top_uuid(&self) -> BlockId {
        self.top_uuid
    }

    pub fn parent_uuid(&self) -> Option<BlockId> {
        self.parent_uuid
    }

    pub fn child_uuid(&self) -> Option<BlockId> {
        self.child_uuid
    }

    /// True for a block without a parent
    pub fn is_head(&self) -> bool {
        self.parent_uuid.is_none()
    }

    /// True for a block without a child
    pub fn is_terminal(&self) -> bool {
        self.child_uuid.is_none()
    }

    pub fn tab_uuid(&self) -> Option<TabId> {
        self.tab_uuid
    }

    /// Template instances shown in the palette are not editable
    pub fn is_sample(&self) -> bool {
        self.is_sample
    }

    pub fn appearance(&self) -> &BlockAppearance {
        &self.appearance
    }

    pub fn path(&self) -> &str {
        &self.appearance.path
    }

    pub fn shadow_path(&self) -> &str {
        &self.shadow_path
    }

    pub fn set_shadow_path(&mut self, path: impl Into<String>) {
        self.shadow_path = path.into();
    }

    pub fn stroke_color(&self) -> &str {
        &self.appearance.stroke_color
    }

    pub fn fill_color(&self) -> &str {
        &self.appearance.fill_color
    }

    pub fn payload(&self) -> &BlockPayload {
        &self.payload
    }

    /// Payload editing never changes the kind: the variant is fixed.
    pub fn payload_mut(&mut self) -> PayloadMut<'_> {
        PayloadMut(&mut self.payload)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.offset(dx, dy);
    }
}

/// Mutable view of a payload that allows editing fields but not swapping the variant
pub struct PayloadMut<'a>(&'a mut BlockPayload);

impl<'a> PayloadMut<'a> {
    pub fn define_component(self) -> Option<&'a mut crate::categories::DefineComponentPayload> {
        match self.0 {
            BlockPayload::DefineComponent(p) => Some(p),
            _ => None,
        }
    }

    pub fn movie_loading(self) -> Option<&'a mut crate::categories::MovieLoadingPayload> {
        match self.0 {
            BlockPayload::MovieLoading(p) => Some(p),
            _ => None,
        }
    }

    pub fn gray_scale_filter(self) -> Option<&'a mut crate::categories::GrayScaleFilterPayload> {
        match self.0 {
            BlockPayload::GrayScaleFilter(p) => Some(p),
            _ => None,
        }
    }
}

/// Block construction errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlockError {
    /// Kind missing, unknown, or withheld by the registry
    #[error("Unregistered block kind: {0}")]
    UnregisteredKind(String),

    /// A required construction field was not supplied
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Restored payload belongs to another kind
    #[error("Payload of kind {payload} cannot be used for a {kind} block")]
    PayloadMismatch { kind: BlockKind, payload: BlockKind },
}
