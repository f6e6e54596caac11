//! Editor configuration
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```json
//! { "proximity": { "max_dy": 70.0 }, "block_height": 40.0 }
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::chain::ProximityThresholds;
use crate::core::Position;
use crate::navigation::HistoryKind;

/// Tunables for snapping, tab creation and clip placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub proximity: ProximityThresholds,
    /// Vertical pitch between a block and its child once snapped
    pub block_height: f64,
    pub default_tab: TabDefaults,
    pub default_clip: ClipDefaults,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            proximity: ProximityThresholds::default(),
            block_height: 37.0,
            default_tab: TabDefaults::default(),
            default_clip: ClipDefaults::default(),
        }
    }
}

/// First page of a newly opened tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabDefaults {
    pub kind: HistoryKind,
    pub title: String,
    pub location: String,
}

impl Default for TabDefaults {
    fn default() -> Self {
        Self {
            kind: HistoryKind::General,
            title: "New Tab".to_string(),
            location: "/".to_string(),
        }
    }
}

/// Where a new clip lands on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipDefaults {
    pub position: Position,
    pub width: f64,
}

impl Default for ClipDefaults {
    fn default() -> Self {
        Self {
            position: Position::new(0.0, 1.0),
            width: 200.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading editor config {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("parsing editor config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = EditorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.proximity.max_dx, 80.0);
        assert_eq!(config.proximity.min_dx, -160.0);
        assert_eq!(config.default_clip.width, 200.0);
    }

    #[test]
    fn test_partial_override() {
        let config =
            EditorConfig::from_json_str(r#"{"proximity":{"max_dy":70.0},"block_height":40.0}"#)
                .unwrap();
        assert_eq!(config.proximity.max_dy, 70.0);
        assert_eq!(config.proximity.min_dy, 30.0);
        assert_eq!(config.block_height, 40.0);
        assert_eq!(config.default_tab.title, "New Tab");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_tab":{{"title":"Home"}}}}"#).unwrap();
        let config = EditorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_tab.title, "Home");
        assert_eq!(config.default_tab.location, "/");
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = EditorConfig::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.json"));
    }
}
