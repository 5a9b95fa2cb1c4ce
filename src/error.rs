use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for stage loading and asset lookup.
#[derive(Debug, Error)]
pub enum StageError {
    /// File I/O error
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// JSON parse error
    #[error("JSON parse error in {path}: {source}")]
    Json {
        /// Document that failed to parse (`<inline>` for strings)
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
    /// Unsupported file format (non-JSON)
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    /// No tile layers were found in the map JSON
    #[error("No tile layers found in map")]
    NoLayer,
    /// Map width or height is zero
    #[error("Map dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions {
        /// Width in tiles
        width: usize,
        /// Height in tiles
        height: usize,
    },
    /// Map is too large to address: `width * height` overflows, or a side
    /// exceeds `i32::MAX`
    #[error("Map dimensions {width}x{height} are too large")]
    DimensionsTooLarge {
        /// Width in tiles
        width: usize,
        /// Height in tiles
        height: usize,
    },
    /// A layer's data length does not match width * height
    #[error("Invalid layer size for layer '{layer}': expected {expected} tiles, got {actual}")]
    InvalidLayerSize {
        /// Layer name
        layer: String,
        /// `width * height`
        expected: usize,
        /// Length of the layer data
        actual: usize,
    },
    /// A named bitmap or map is absent from the asset pack
    #[error("Missing asset '{0}'")]
    MissingAsset(String),
    /// `reset` was called before any stage was selected
    #[error("No stage has been selected")]
    NoStageBound,
}
