//! Proximity engine
//!
//! Decides whether a dragged block is close enough to a candidate parent to
//! snap under it. Blocks stack top to bottom and a child hangs below-right of
//! its parent, so the window is asymmetric on both axes:
//!
//! ```text
//!   parent.x - 80 <= child.x <= parent.x + 160
//!   parent.y + 30 <= child.y <= parent.y + 65
//! ```
//!
//! Evaluated once per drag frame by the caller; no state between calls.

use serde::{Deserialize, Serialize};

use crate::core::Position;

/// Snap window bounds, all inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityThresholds {
    /// Upper bound of `parent.x - child.x`
    pub max_dx: f64,
    /// Lower bound of `parent.x - child.x`
    pub min_dx: f64,
    /// Upper bound of `child.y - parent.y`
    pub max_dy: f64,
    /// Lower bound of `child.y - parent.y`
    pub min_dy: f64,
}

impl Default for ProximityThresholds {
    fn default() -> Self {
        Self {
            max_dx: 80.0,
            min_dx: -160.0,
            max_dy: 65.0,
            min_dy: 30.0,
        }
    }
}

impl ProximityThresholds {
    /// Whether `child` sits inside the snap window below `parent`.
    pub fn is_nearby(&self, parent: Position, child: Position) -> bool {
        let dx = parent.x - child.x;
        let dy = child.y - parent.y;
        dx <= self.max_dx && dx >= self.min_dx && dy <= self.max_dy && dy >= self.min_dy
    }
}

/// [`ProximityThresholds::is_nearby`] with the default window.
pub fn is_nearby(parent: Position, child: Position) -> bool {
    ProximityThresholds::default().is_nearby(parent, child)
}
