use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Level-absolute X that maps to the left edge of the layout canvas.
pub const START_ORIGIN_X: i32 = 736;
/// Level-absolute Y that maps to the top edge of the layout canvas.
pub const START_ORIGIN_Y: i32 = 688;

// ── RenderConfig ──────────────────────────────────────────────────────────────

/// Renderer settings.
///
/// The origin translates a stored start position (level-absolute pixels) into
/// canvas pixels: `canvas = stored - origin`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub origin_x: i32,
    pub origin_y: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            origin_x: START_ORIGIN_X,
            origin_y: START_ORIGIN_Y,
        }
    }
}

// ── AssetManifest ─────────────────────────────────────────────────────────────

/// File names of the atlas resources inside an asset directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    /// Mega Drive palette dump.
    pub palette: String,
    /// Indexed PNG, one row of 24 × 24 cells.
    pub sprites: String,
    /// Indexed PNG with the digit glyphs.
    pub font: String,
    /// Indexed PNG of the start marker.
    pub start_marker: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            palette: "Palette.bin".into(),
            sprites: "GFX.png".into(),
            font: "Font.png".into(),
            start_marker: "StartPos.png".into(),
        }
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

/// Top-level settings file.  Every field is optional in JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub assets: AssetManifest,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&json)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
