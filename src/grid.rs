use crate::blueprint::TileBlueprint;
use crate::tile::{StaticTile, TileId};

/// Dense row-major grid. Reads are bounds-safe, writes are a caller contract.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Grid filled with `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![T::default(); width * height],
        }
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` lies inside the grid.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<T> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    /// Unchecked write: callers bounds-check. Debug builds assert.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        debug_assert!(
            x < self.width && y < self.height,
            "grid write out of bounds: ({x}, {y}) in {}x{}",
            self.width,
            self.height
        );
        self.cells[y * self.width + x] = value;
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Cells with their coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let w = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % w, i / w, c))
    }
}

/// Mutable working copy of the primary layer.
pub type TileGrid = Grid<TileId>;

/// Solidity class per cell. `None` is empty.
pub type CollisionClass = Option<StaticTile>;

/// Collision classes derived from a [`TileGrid`].
pub type CollisionGrid = Grid<CollisionClass>;

impl TileGrid {
    /// Fresh copy of the blueprint's primary layer.
    pub fn from_blueprint(blueprint: &TileBlueprint) -> Self {
        Grid {
            width: blueprint.width(),
            height: blueprint.height(),
            cells: blueprint.primary().data.clone(),
        }
    }
}
