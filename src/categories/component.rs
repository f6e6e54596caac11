//! Component definition payload

use serde::{Deserialize, Serialize};

/// Payload of a `DefineComponentBlock`: names the component its chain defines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefineComponentPayload {
    #[serde(rename = "componentName", default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
}
