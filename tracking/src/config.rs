//! Tracking configuration loaded from TOML.
//!
//! Every field is optional in the file:
//!
//! ```toml
//! collision = true
//! horizontal_only = true
//! material_name = "plane_occlusion"
//! index_width = "auto"   # or "u32"
//! event_capacity = 64
//! box_footprint = [0.3, 0.3]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Index width used for plane meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexWidth {
    /// 16-bit when every index fits, 32-bit otherwise.
    #[default]
    Auto,
    /// Always 32-bit.
    U32,
}

/// Settings for [`PlaneTrackingManager`](crate::PlaneTrackingManager).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Generate a static collision shape for every plane.
    pub collision: bool,
    /// Ignore vertical planes.
    pub horizontal_only: bool,
    /// Material assigned to plane meshes.
    pub material_name: String,
    /// Index width policy.
    pub index_width: IndexWidth,
    /// Capacity of the event channel between provider and manager.
    pub event_capacity: usize,
    /// Footprint of the hidden box (x, z) in metres.
    pub box_footprint: [f32; 2],
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            collision: true,
            horizontal_only: true,
            material_name: "plane_occlusion".into(),
            index_width: IndexWidth::Auto,
            event_capacity: 64,
            box_footprint: [0.3, 0.3],
        }
    }
}

/// Errors loading a [`TrackingConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl TrackingConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}
