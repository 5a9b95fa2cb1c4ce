use crate::error::StageError;
use serde::Deserialize;
use std::path::PathBuf;

/// Tunables for a stage. Every field has a default, so partial JSON works.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Logical canvas width in pixels.
    pub canvas_width: u32,
    /// Logical canvas height in pixels. Clouds sit on its bottom edge.
    pub canvas_height: u32,
    /// Cloud scroll, pixels per tick unit.
    pub cloud_speed: f32,
    /// Lava phase advance per tick unit.
    pub lava_speed: f32,
    /// Largest shake offset in pixels on each axis.
    pub shake_magnitude: i32,
    /// Seed for the shake RNG.
    pub shake_seed: u64,
    /// Bitmap name of the static sky.
    pub sky_asset: String,
    /// Bitmap name of the scrolling cloud strip.
    pub clouds_asset: String,
    /// Bitmap name of the tile atlas.
    pub tiles_asset: String,
}

impl Default for StageConfig {
    fn default() -> Self {
        StageConfig {
            canvas_width: 256,
            canvas_height: 192,
            cloud_speed: 0.5,
            lava_speed: 0.25,
            shake_magnitude: 2,
            shake_seed: 0,
            sky_asset: "sky1".to_owned(),
            clouds_asset: "clouds1".to_owned(),
            tiles_asset: "tiles1".to_owned(),
        }
    }
}

impl StageConfig {
    /// Parses a config document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, StageError> {
        serde_json::from_str(json).map_err(|source| StageError::Json {
            path: PathBuf::from("<inline>"),
            source,
        })
    }
}
