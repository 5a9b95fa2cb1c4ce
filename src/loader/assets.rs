use super::json_loader::decode_manifest_file;
use crate::blueprint::TileBlueprint;
use crate::error::StageError;
use anyhow::Context;
use macroquad::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Named bitmaps and blueprints shared by every stage.
#[derive(Debug)]
pub struct AssetPack<B> {
    bitmaps: HashMap<String, B>,
    blueprints: HashMap<String, TileBlueprint>,
}

impl<B> Default for AssetPack<B> {
    fn default() -> Self {
        AssetPack {
            bitmaps: HashMap::new(),
            blueprints: HashMap::new(),
        }
    }
}

impl<B> AssetPack<B> {
    /// Empty pack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bitmap, replacing any with the same name.
    pub fn insert_bitmap(&mut self, name: impl Into<String>, bitmap: B) -> &mut Self {
        self.bitmaps.insert(name.into(), bitmap);
        self
    }

    /// Registers a blueprint, replacing any with the same name.
    pub fn insert_blueprint(&mut self, name: impl Into<String>, blueprint: TileBlueprint) -> &mut Self {
        self.blueprints.insert(name.into(), blueprint);
        self
    }

    /// Bitmap by name, or [`StageError::MissingAsset`].
    pub fn bitmap(&self, name: &str) -> Result<&B, StageError> {
        self.bitmaps
            .get(name)
            .ok_or_else(|| StageError::MissingAsset(name.to_owned()))
    }

    /// Blueprint by name, or [`StageError::MissingAsset`].
    pub fn blueprint(&self, name: &str) -> Result<&TileBlueprint, StageError> {
        self.blueprints
            .get(name)
            .ok_or_else(|| StageError::MissingAsset(name.to_owned()))
    }
}

impl AssetPack<Texture2D> {
    /// Loads every texture and map listed in a JSON manifest.
    pub async fn load(manifest_path: &str) -> anyhow::Result<Self> {
        let (manifest, base) = decode_manifest_file(Path::new(manifest_path))?;
        let mut pack = AssetPack::new();

        for (name, rel) in &manifest.bitmaps {
            let img_path = base.join(rel);
            let tex = load_texture(&img_path.to_string_lossy())
                .await
                .with_context(|| format!("Loading texture {}", rel))?;
            tex.set_filter(FilterMode::Nearest);
            pack.insert_bitmap(name.clone(), tex);
        }

        for (name, rel) in &manifest.maps {
            let blueprint = TileBlueprint::from_file(base.join(rel))
                .with_context(|| format!("Loading map {}", rel))?;
            pack.insert_blueprint(name.clone(), blueprint);
        }

        info!(
            bitmaps = pack.bitmaps.len(),
            maps = pack.blueprints.len(),
            manifest = manifest_path,
            "asset_pack_loaded"
        );
        Ok(pack)
    }
}
