//! Tile queries used by the physics step.

use crate::grid::{CollisionGrid, TileGrid};
use crate::tile::StaticTile;

/// Damage a cell deals to an actor occupying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Harm {
    /// No effect.
    Safe = 0,
    /// Hurts, e.g. standing on spikes.
    Harmful = 1,
    /// Kills outright (lava).
    Lethal = 2,
}

/// Borrowed view over a stage's grids.
#[derive(Debug, Clone, Copy)]
pub struct Hazards<'g> {
    tiles: &'g TileGrid,
    collision: &'g CollisionGrid,
}

impl<'g> Hazards<'g> {
    /// View over a tile grid and its collision grid.
    pub fn new(tiles: &'g TileGrid, collision: &'g CollisionGrid) -> Self {
        Hazards { tiles, collision }
    }

    /// The world edge counts as solid so actors cannot leave the map.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        match self.collision.get(x, y) {
            None => true,
            Some(class) => class.is_some_and(StaticTile::is_solid),
        }
    }

    /// Vines have no collision class, so this reads the tile grid.
    pub fn is_vine(&self, x: i32, y: i32) -> bool {
        self.tiles.get(x, y).is_some_and(|t| t.is(StaticTile::Vine))
    }

    /// Lava cell. Outside the grid is never lava.
    pub fn is_lava(&self, x: i32, y: i32) -> bool {
        self.tiles.get(x, y).is_some_and(|t| t.is(StaticTile::Lava))
    }

    /// Lava kills. Spikes hurt whatever stands on the cell above them, so the
    /// spike check reads row `y + 1` regardless of the queried cell.
    pub fn is_harmful(&self, x: i32, y: i32) -> Harm {
        if !self.tiles.contains(x, y) {
            return Harm::Safe;
        }
        if self.is_lava(x, y) {
            return Harm::Lethal;
        }
        if self.collision.get(x, y + 1) == Some(Some(StaticTile::Spikes)) {
            return Harm::Harmful;
        }
        Harm::Safe
    }
}
