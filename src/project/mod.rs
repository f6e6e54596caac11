//! Projects, components and clips
//!
//! A component is a named group of blocks; a clip places a component on the
//! timeline of a project.

pub mod clip;
pub mod component;

use serde::{Deserialize, Serialize};

use crate::core::{ClipId, ComponentId, ProjectId};

pub use clip::{Clip, Clips};
pub use component::{Component, Components};

/// A named project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub uuid: ProjectId,
    pub name: String,
}

impl Project {
    pub fn new(uuid: ProjectId, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectError {
    #[error("Component not found: {0}")]
    ComponentNotFound(ComponentId),

    #[error("Clip not found: {0}")]
    ClipNotFound(ClipId),

    #[error("Clip width must be positive, got {0}")]
    InvalidWidth(f64),
}
