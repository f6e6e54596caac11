//! Filter payloads
//!
//! Only the gray-scale filter is parameterised; the blur filter has no
//! settings of its own.

use serde::{Deserialize, Serialize};

/// Which channel a gray-scale conversion is based on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GrayScaleFilterMode {
    #[default]
    Invalid,
    BasedOnR,
    BasedOnG,
    BasedOnB,
}

/// Payload of a `GrayScaleFilterBlock`. Every field starts unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrayScaleFilterPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inversion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<GrayScaleFilterMode>,
}

impl GrayScaleFilterPayload {
    /// Whether enough is set for the filter to run
    pub fn is_configured(&self) -> bool {
        self.value.is_some()
            && !matches!(self.mode, None | Some(GrayScaleFilterMode::Invalid))
    }
}
