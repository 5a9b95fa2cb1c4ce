//! Derives the collision grid and spawn requests from a tile grid.

use crate::grid::{CollisionGrid, Grid, TileGrid};
use crate::tile::{SpawnKind, TileKind};
use tracing::warn;

/// Request for the object system to create an entity at a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnRequest {
    /// Entity class.
    pub kind: SpawnKind,
    /// Tile column.
    pub x: usize,
    /// Tile row.
    pub y: usize,
}

/// Result of one parse pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// Same size as the tile grid.
    pub collision: CollisionGrid,
    /// Row-major scan order. Empty when parsing collision only.
    pub spawns: Vec<SpawnRequest>,
}

/// Scans `tiles` once. With `collision_only`, spawn tiles are skipped
/// entirely so a reset does not duplicate live entities.
pub fn parse(tiles: &TileGrid, collision_only: bool) -> ParseOutcome {
    let mut collision: CollisionGrid = Grid::new(tiles.width(), tiles.height());
    let mut spawns = Vec::new();

    for (x, y, id) in tiles.iter() {
        match id.kind() {
            TileKind::Empty => {}
            TileKind::Static(tile) => collision.set(x, y, Some(tile)),
            TileKind::Spawn(kind) => {
                if !collision_only {
                    spawns.push(SpawnRequest { kind, x, y });
                }
            }
            TileKind::Unknown(raw) => {
                warn!(id = raw, x, y, "unknown_tile_id_ignored");
            }
        }
    }

    ParseOutcome { collision, spawns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::TileBlueprint;
    use crate::tile::StaticTile;

    fn grid(rows: &[[u32; 3]]) -> TileGrid {
        TileGrid::from_blueprint(&TileBlueprint::from_rows(rows).unwrap())
    }

    #[test]
    fn static_tiles_become_collision_classes() {
        let out = parse(&grid(&[[1, 2, 3], [4, 5, 18]]), false);
        assert_eq!(out.collision.get(0, 0), Some(Some(StaticTile::Soil)));
        assert_eq!(out.collision.get(1, 0), Some(Some(StaticTile::Vine)));
        assert_eq!(out.collision.get(2, 1), Some(Some(StaticTile::PurpleInert)));
        assert!(out.spawns.is_empty());
    }

    #[test]
    fn spawn_tiles_emit_requests_in_scan_order() {
        let out = parse(&grid(&[[0, 12, 0], [19, 1, 7]]), false);
        let keys: Vec<_> = out.spawns.iter().map(|s| (s.kind.0, s.x, s.y)).collect();
        assert_eq!(keys, vec![(12, 1, 0), (19, 0, 1), (7, 2, 1)]);
        assert_eq!(out.collision.get(1, 0), Some(None));
        assert_eq!(out.collision.get(0, 1), Some(None));
    }

    #[test]
    fn collision_only_ignores_spawn_tiles() {
        let out = parse(&grid(&[[0, 12, 0], [19, 1, 7]]), true);
        assert!(out.spawns.is_empty());
        assert_eq!(out.collision.get(1, 0), Some(None));
        assert_eq!(out.collision.get(1, 1), Some(Some(StaticTile::Soil)));
    }

    #[test]
    fn unknown_ids_stay_empty() {
        let out = parse(&grid(&[[40, 0, 0]]), false);
        assert_eq!(out.collision.get(0, 0), Some(None));
        assert!(out.spawns.is_empty());
    }
}
