//! Core block abstractions and types
//!
//! This module defines the identifiers, canvas coordinates, block entity and
//! kind registry that the chain, navigation and workspace layers build on.

pub mod appearance;
pub mod block;
pub mod identity;
pub mod registry;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub use block::{Block, BlockContext, BlockError};
pub use identity::IdGenerator;
pub use registry::KindRegistry;

macro_rules! typed_id {
    ($(#[$meta:meta])* $T:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $T(pub Uuid);

        impl $T {
            /// Parse from the standard hyphenated text form.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(s).map(Self)
            }

            /// The wrapped UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $T {
            fn from(u: Uuid) -> Self {
                Self(u)
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }
    };
}

typed_id!(
    /// Unique identifier for a block on a canvas
    BlockId
);
typed_id!(
    /// Unique identifier for a reusable component
    ComponentId
);
typed_id!(
    /// Unique identifier for a clip placed on the timeline
    ClipId
);
typed_id!(
    /// Unique identifier for a browsing tab
    TabId
);
typed_id!(
    /// Unique identifier for a project
    ProjectId
);

/// A point in canvas coordinates. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This position shifted by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The `(dx, dy)` that takes `self` to `other`.
    pub fn delta_to(self, other: Position) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }

    pub fn distance_squared(self, other: Position) -> f64 {
        let (dx, dy) = self.delta_to(other);
        dx * dx + dy * dy
    }
}
