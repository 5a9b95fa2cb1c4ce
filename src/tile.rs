//! Fixed tile vocabulary.
//!
//! Map cells carry raw integer IDs. Each ID is decoded once into a
//! [`TileKind`] so that callers match on variants instead of ID ranges.

/// Raw tile ID as stored in blueprints and grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileId(pub u32);

impl TileId {
    /// Empty cell.
    pub const EMPTY: TileId = TileId(0);

    /// The bare integer.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Whether this is ID 0.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Decode the ID into its role.
    pub fn kind(self) -> TileKind {
        match self.0 {
            0 => TileKind::Empty,
            7..=16 | 19 => TileKind::Spawn(SpawnKind(self.0)),
            id => match StaticTile::from_id(id) {
                Some(tile) => TileKind::Static(tile),
                None => TileKind::Unknown(id),
            },
        }
    }

    /// Shorthand for `self.kind()` matching a specific static tile.
    #[inline]
    pub fn is(self, tile: StaticTile) -> bool {
        self.0 == tile.id().0
    }
}

impl From<StaticTile> for TileId {
    fn from(tile: StaticTile) -> Self {
        tile.id()
    }
}

/// Tiles that stay in the grid and take part in rendering and collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaticTile {
    /// ID 1, autotiled ground.
    Soil,
    /// ID 2, climbable, not solid.
    Vine,
    /// ID 3, lethal, animated.
    Lava,
    /// ID 4, solid; hurts actors standing on it.
    Spikes,
    /// ID 5, plain solid block.
    Stone,
    /// ID 6, solid block.
    Lock,
    /// Solid state of the togglable purple block.
    PurpleSolid,
    /// Inert state of the togglable purple block.
    PurpleInert,
}

impl StaticTile {
    /// Static tile for `id`, if it is one.
    pub fn from_id(id: u32) -> Option<Self> {
        Some(match id {
            1 => StaticTile::Soil,
            2 => StaticTile::Vine,
            3 => StaticTile::Lava,
            4 => StaticTile::Spikes,
            5 => StaticTile::Stone,
            6 => StaticTile::Lock,
            17 => StaticTile::PurpleSolid,
            18 => StaticTile::PurpleInert,
            _ => return None,
        })
    }

    /// The ID this tile is stored as.
    pub fn id(self) -> TileId {
        TileId(match self {
            StaticTile::Soil => 1,
            StaticTile::Vine => 2,
            StaticTile::Lava => 3,
            StaticTile::Spikes => 4,
            StaticTile::Stone => 5,
            StaticTile::Lock => 6,
            StaticTile::PurpleSolid => 17,
            StaticTile::PurpleInert => 18,
        })
    }

    /// Whether actors collide with this tile.
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            StaticTile::Soil
                | StaticTile::Spikes
                | StaticTile::Stone
                | StaticTile::Lock
                | StaticTile::PurpleSolid
        )
    }
}

/// Entity class requested by a spawn tile. The value is the tile ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpawnKind(pub u32);

/// Decoded role of a tile ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// ID 0.
    Empty,
    /// Stays in the grid.
    Static(StaticTile),
    /// Replaced by an entity on load.
    Spawn(SpawnKind),
    /// Outside the vocabulary; ignored by the parser and renderer.
    Unknown(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_every_id_in_vocabulary() {
        assert_eq!(TileId(0).kind(), TileKind::Empty);
        assert_eq!(TileId(1).kind(), TileKind::Static(StaticTile::Soil));
        assert_eq!(TileId(6).kind(), TileKind::Static(StaticTile::Lock));
        for id in 7..=16 {
            assert_eq!(TileId(id).kind(), TileKind::Spawn(SpawnKind(id)));
        }
        assert_eq!(TileId(17).kind(), TileKind::Static(StaticTile::PurpleSolid));
        assert_eq!(TileId(18).kind(), TileKind::Static(StaticTile::PurpleInert));
        assert_eq!(TileId(19).kind(), TileKind::Spawn(SpawnKind(19)));
        assert_eq!(TileId(42).kind(), TileKind::Unknown(42));
    }

    #[test]
    fn static_ids_round_trip() {
        for id in [1, 2, 3, 4, 5, 6, 17, 18] {
            let tile = StaticTile::from_id(id).unwrap();
            assert_eq!(tile.id(), TileId(id));
        }
    }

    #[test]
    fn only_ground_family_is_solid() {
        let solid: Vec<u32> = [1, 2, 3, 4, 5, 6, 17, 18]
            .into_iter()
            .filter(|id| StaticTile::from_id(*id).unwrap().is_solid())
            .collect();
        assert_eq!(solid, vec![1, 4, 5, 6, 17]);
    }
}
