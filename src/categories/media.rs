//! Media source payloads

use serde::{Deserialize, Serialize};

/// Payload of a `MovieLoadingBlock`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieLoadingPayload {
    /// Path of the movie material, unset until the user picks one
    #[serde(rename = "materialPath", default, skip_serializing_if = "Option::is_none")]
    pub material_path: Option<String>,
}
