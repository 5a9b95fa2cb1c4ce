// src/loader/json_loader.rs
use crate::blueprint::{Layer, TileBlueprint};
use crate::error::StageError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    name: String,
    #[serde(default)]
    data: Vec<u32>,
    #[serde(rename = "type")]
    kind: Option<String>, // "tilelayer" expected here
}

#[derive(Deserialize)]
struct JsonMap {
    width: usize,
    height: usize,
    layers: Vec<JsonLayer>,
}

/// `{ "bitmaps": { name: path }, "maps": { name: path } }`, paths relative
/// to the manifest.
#[derive(Deserialize, Debug, Default)]
pub struct AssetManifest {
    /// Bitmap name to image path.
    #[serde(default)]
    pub bitmaps: BTreeMap<String, String>,
    /// Stage name to map JSON path.
    #[serde(default)]
    pub maps: BTreeMap<String, String>,
}

fn inline_path() -> PathBuf {
    PathBuf::from("<inline>")
}

fn require_json(path: &Path) -> Result<(), StageError> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(StageError::UnsupportedFormat(path.display().to_string()));
    }
    Ok(())
}

fn read_json_file(path: &Path) -> Result<String, StageError> {
    require_json(path)?;
    std::fs::read_to_string(path).map_err(|source| StageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn decode_blueprint(txt: &str, origin: PathBuf) -> Result<TileBlueprint, StageError> {
    let j: JsonMap = serde_json::from_str(txt).map_err(|source| StageError::Json {
        path: origin,
        source,
    })?;

    // Object groups and image layers carry no tile data.
    let layers: Vec<Layer> = j
        .layers
        .into_iter()
        .filter(|l| l.kind.as_deref().unwrap_or("tilelayer") == "tilelayer")
        .map(|l| Layer::new(l.name, l.data))
        .collect();

    TileBlueprint::new(j.width, j.height, layers)
}

impl TileBlueprint {
    /// Decodes a Tiled-style JSON map from memory.
    pub fn from_json_str(json: &str) -> Result<Self, StageError> {
        decode_blueprint(json, inline_path())
    }

    /// Load a blueprint from a file path, only supporting JSON for now
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StageError> {
        let p = path.as_ref();
        let txt = read_json_file(p)?;
        decode_blueprint(&txt, p.to_path_buf())
    }
}

/// Reads a manifest and returns it with the directory its paths resolve from.
pub fn decode_manifest_file(path: &Path) -> Result<(AssetManifest, PathBuf), StageError> {
    let txt = read_json_file(path)?;
    let manifest = serde_json::from_str(&txt).map_err(|source| StageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path
        .parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"));
    Ok((manifest, base))
}
