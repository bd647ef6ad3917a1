//! Configuration for layout and rendering.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! curve = "orthogonal"
//!
//! [spacing]
//! horizontal = 260
//!
//! [scene]
//! row_height = 20
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::types::Spacing;
use crate::render::curve::CurveStyle;
use crate::render::svg::SceneConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub spacing: Spacing,
    pub scene: SceneConfig,
    pub curve: CurveStyle,
    /// Abort a redraw on an unresolvable column anchor instead of skipping it.
    /// On in debug builds, off in release builds.
    pub strict_anchors: bool,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            spacing: Spacing::default(),
            scene: SceneConfig::default(),
            curve: CurveStyle::default(),
            strict_anchors: cfg!(debug_assertions),
        }
    }
}

impl DiagramConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}
