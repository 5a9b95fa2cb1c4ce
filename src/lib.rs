#![warn(missing_docs)]

//! Autotiled platformer stage engine for Macroquad.
//!
//! A [`Stage`] owns the runtime tile grid and the collision grid derived
//! from it, answers hazard queries for physics, animates lava and screen
//! shake, and draws everything through a [`Raster`] implementation.

mod animation;
mod blueprint;
mod config;
mod error;
mod grid;
mod hazard;
mod loader {
    pub mod assets;
    pub mod json_loader;
}
mod parser;
pub mod render;
mod stage;
mod tile;

pub use animation::{AnimationState, LAVA_PHASE_PERIOD};
pub use blueprint::{Layer, TileBlueprint};
pub use config::StageConfig;
pub use error::StageError;
pub use grid::{CollisionClass, CollisionGrid, Grid, TileGrid};
pub use hazard::{Harm, Hazards};
pub use loader::assets::AssetPack;
pub use loader::json_loader::{decode_manifest_file, AssetManifest};
pub use parser::{parse, ParseOutcome, SpawnRequest};
pub use render::{Bitmap, Flip, Raster, SrcRect};
pub use stage::{Stage, StageState};
pub use tile::{SpawnKind, StaticTile, TileId, TileKind};
