use crate::error::StageError;
use crate::tile::TileId;

/// One named layer of tile IDs, row-major from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Layer name from the map file.
    pub name: String,
    /// `width * height` IDs.
    pub data: Vec<TileId>,
}

impl Layer {
    /// Layer from raw IDs.
    pub fn new(name: impl Into<String>, data: impl IntoIterator<Item = u32>) -> Self {
        Layer {
            name: name.into(),
            data: data.into_iter().map(TileId).collect(),
        }
    }
}

/// Immutable map data for one stage. Layer 0 is the primary layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileBlueprint {
    width: usize,
    height: usize,
    layers: Vec<Layer>,
}

impl TileBlueprint {
    /// Validates dimensions and layer sizes.
    pub fn new(width: usize, height: usize, layers: Vec<Layer>) -> Result<Self, StageError> {
        if width == 0 || height == 0 {
            return Err(StageError::ZeroDimensions { width, height });
        }
        if layers.is_empty() {
            return Err(StageError::NoLayer);
        }
        let expected = width
            .checked_mul(height)
            .filter(|_| i32::try_from(width).is_ok() && i32::try_from(height).is_ok())
            .ok_or(StageError::DimensionsTooLarge { width, height })?;
        if let Some(bad) = layers.iter().find(|l| l.data.len() != expected) {
            return Err(StageError::InvalidLayerSize {
                layer: bad.name.clone(),
                expected,
                actual: bad.data.len(),
            });
        }
        Ok(TileBlueprint {
            width,
            height,
            layers,
        })
    }

    /// Single-layer blueprint from rows of IDs. Handy for tests and tools.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, StageError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let data = rows.iter().flat_map(|r| r.as_ref().iter().copied());
        Self::new(width, height, vec![Layer::new("main", data)])
    }

    /// Width in tiles.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All tile layers in file order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Looks a layer up by name.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// The layer the stage simulates and draws.
    pub fn primary(&self) -> &Layer {
        &self.layers[0]
    }
}
