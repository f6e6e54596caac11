//! Presentational parameters resolved per block kind
//!
//! Geometry is an SVG path string; the presentation layer draws it as-is.

use serde::{Deserialize, Serialize};

use crate::categories::BlockKind;

/// Standard block widths in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSize {
    XShort = 200,
    Short = 250,
    Medium = 300,
    Long = 350,
    XLong = 400,
}

impl BlockSize {
    pub fn width(self) -> u32 {
        self as u32
    }
}

/// Path, stroke and fill of a block kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAppearance {
    pub path: String,
    #[serde(rename = "strokeColor")]
    pub stroke_color: String,
    #[serde(rename = "fillColor")]
    pub fill_color: String,
}

impl BlockAppearance {
    pub fn new(path: String, stroke_color: &str, fill_color: &str) -> Self {
        Self {
            path,
            stroke_color: stroke_color.to_string(),
            fill_color: fill_color.to_string(),
        }
    }

    /// Built-in look of `kind`
    pub fn builtin(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Debug => {
                Self::new(basic_block_path(BlockSize::Long.width()), "#c53d43", "#e83929")
            }
            BlockKind::DefineComponent => Self::new(
                only_parent_block_path(BlockSize::Medium.width()),
                "#bd9900",
                "#e3b100",
            ),
            BlockKind::MovieLoading => {
                Self::new(basic_block_path(BlockSize::Medium.width()), "#ff7f1e", "#ffa02c")
            }
            BlockKind::GrayScaleFilter => {
                Self::new(basic_block_path(BlockSize::Medium.width()), "#2f2f2f", "#3e3e3e")
            }
            BlockKind::BlurFilter => {
                Self::new(basic_block_path(BlockSize::Medium.width()), "#601b7d", "#79219c")
            }
        }
    }
}

/// Block with a notch on top and a tab below, so it stacks both ways.
pub fn basic_block_path(width: u32) -> String {
    format!(
        "m 0,4 A 4,4 0 0,1 4,0 H 12 c 2,0 3,1 4,2 l 4,4 c 1,1 2,2 4,2 h 12 c 2,0 3,-1 4,-2 l 4,-4 c 1,-1 2,-2 4,-2 H {} a 4,4 0 0,1 4,4 v 40  a 4,4 0 0,1 -4,4 H 48   c -2,0 -3,1 -4,2 l -4,4 c -1,1 -2,2 -4,2 h -12 c -2,0 -3,-1 -4,-2 l -4,-4 c -1,-1 -2,-2 -4,-2 H 4 a 4,4 0 0,1 -4,-4 z",
        width
    )
}

/// Hat-shaped block: rounded top, tab below, nothing can sit above it.
pub fn only_parent_block_path(width: u32) -> String {
    format!(
        "m 0,0 c 25,-22 71,-22 96,0 H {} a 4,4 0 0,1 4,4 v 40  a 4,4 0 0,1 -4,4 H 48   c -2,0 -3,1 -4,2 l -4,4 c -1,1 -2,2 -4,2 h -12 c -2,0 -3,-1 -4,-2 l -4,-4 c -1,-1 -2,-2 -4,-2 H 4 a 4,4 0 0,1 -4,-4 z",
        width
    )
}
