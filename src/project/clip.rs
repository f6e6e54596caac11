//! Timeline clips
//!
//! A clip's position and width are its own; they do not follow the internal
//! layout of the component it references.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Component, Components, ProjectError};
use crate::config::ClipDefaults;
use crate::core::{ClipId, ComponentId, IdGenerator, Position, ProjectId};

/// A component placed on a project's timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub uuid: ClipId,
    pub name: String,
    pub component_uuid: ComponentId,
    pub project_uuid: ProjectId,
    pub position: Position,
    pub width: f64,
    /// Shared clips show up in every project
    #[serde(default)]
    pub is_external: bool,
}

/// All clips, keyed by uuid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clips {
    clips: IndexMap<ClipId, Clip>,
}

impl Clips {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, clip: Clip) {
        self.clips.insert(clip.uuid, clip);
    }

    pub fn extend(&mut self, clips: impl IntoIterator<Item = Clip>) {
        for clip in clips {
            self.insert(clip);
        }
    }

    /// Place `component` on the timeline of `project`, named after it.
    pub fn add_for_component(
        &mut self,
        component: &Component,
        project: ProjectId,
        ids: &mut IdGenerator,
        defaults: &ClipDefaults,
    ) -> ClipId {
        let uuid: ClipId = ids.mint();
        self.insert(Clip {
            uuid,
            name: component.display_name().to_string(),
            component_uuid: component.uuid,
            project_uuid: project,
            position: defaults.position,
            width: defaults.width,
            is_external: false,
        });
        debug!(clip = %uuid, component = %component.uuid, "clip added");
        uuid
    }

    /// Place the component with uuid `component` on the timeline of `project`.
    pub fn add(
        &mut self,
        component: ComponentId,
        project: ProjectId,
        components: &Components,
        ids: &mut IdGenerator,
        defaults: &ClipDefaults,
    ) -> Result<ClipId, ProjectError> {
        let component = components.get(component)?;
        Ok(self.add_for_component(component, project, ids, defaults))
    }

    pub fn remove(&mut self, uuid: ClipId) -> Result<Clip, ProjectError> {
        self.clips
            .shift_remove(&uuid)
            .ok_or(ProjectError::ClipNotFound(uuid))
    }

    pub fn get(&self, uuid: ClipId) -> Option<&Clip> {
        self.clips.get(&uuid)
    }

    /// Clips of `project` plus every external clip, in insertion order.
    pub fn filtered(&self, project: ProjectId) -> Vec<&Clip> {
        self.clips
            .values()
            .filter(|clip| clip.project_uuid == project || clip.is_external)
            .collect()
    }

    pub fn update_position(&mut self, uuid: ClipId, position: Position) -> Result<(), ProjectError> {
        let clip = self
            .clips
            .get_mut(&uuid)
            .ok_or(ProjectError::ClipNotFound(uuid))?;
        clip.position = position;
        Ok(())
    }

    pub fn update_width(&mut self, uuid: ClipId, width: f64) -> Result<(), ProjectError> {
        if width.is_nan() || width <= 0.0 {
            return Err(ProjectError::InvalidWidth(width));
        }
        let clip = self
            .clips
            .get_mut(&uuid)
            .ok_or(ProjectError::ClipNotFound(uuid))?;
        clip.width = width;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
