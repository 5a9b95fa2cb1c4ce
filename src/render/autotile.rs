//! Per-cell tile drawing with neighbour-dependent quadrant selection.
//!
//! Every tile covers 16×16 pixels built from four 8×8 pieces of the tile
//! atlas. Which piece lands in each quadrant depends on the eight neighbours.
//! Soil uses a 256-entry table indexed by the neighbour mask; the other
//! families resolve their few cases inline.

use super::{Canvas, Raster, SrcRect};
use crate::animation::AnimationState;
use crate::grid::TileGrid;
use crate::tile::{StaticTile, TileId, TileKind};

/// Tile edge in pixels.
pub const TILE: i32 = 16;
/// Quadrant piece edge in pixels.
pub const PIECE: i32 = 8;

// Neighbour bits. A set bit means the neighbour is "open" (not the same tile).
/// Neighbour above.
pub const N: u8 = 1 << 0;
/// Neighbour above-right.
pub const NE: u8 = 1 << 1;
/// Neighbour to the right.
pub const E: u8 = 1 << 2;
/// Neighbour below-right.
pub const SE: u8 = 1 << 3;
/// Neighbour below.
pub const S: u8 = 1 << 4;
/// Neighbour below-left.
pub const SW: u8 = 1 << 5;
/// Neighbour to the left.
pub const W: u8 = 1 << 6;
/// Neighbour above-left.
pub const NW: u8 = 1 << 7;

const OFFSETS: [(u8, i32, i32); 8] = [
    (N, 0, -1),
    (NE, 1, -1),
    (E, 1, 0),
    (SE, 1, 1),
    (S, 0, 1),
    (SW, -1, 1),
    (W, -1, 0),
    (NW, -1, -1),
];

/// Atlas position of an 8×8 piece, in piece units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Column in 8 px units.
    pub x: u8,
    /// Row in 8 px units.
    pub y: u8,
}

const fn piece(x: u8, y: u8) -> Piece {
    Piece { x, y }
}

impl Piece {
    fn src(self) -> SrcRect {
        SrcRect::new(self.x as i32 * PIECE, self.y as i32 * PIECE, PIECE, PIECE)
    }
}

/// Resolved soil graphic for one neighbour mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoilPieces {
    /// Top-left quadrant.
    pub tl: Piece,
    /// Top-right quadrant.
    pub tr: Piece,
    /// Bottom-left quadrant.
    pub bl: Piece,
    /// Bottom-right quadrant.
    pub br: Piece,
    /// Grass lip drawn 8 px left of the tile.
    pub overhang_left: bool,
    /// Grass lip drawn 16 px right of the tile's origin.
    pub overhang_right: bool,
}

impl SoilPieces {
    /// Soil fully surrounded by soil.
    pub const INTERIOR: SoilPieces = SoilPieces {
        tl: piece(2, 0),
        tr: piece(3, 0),
        bl: piece(0, 1),
        br: piece(1, 1),
        overhang_left: false,
        overhang_right: false,
    };

    /// `[tl, tr, bl, br]`.
    pub fn quadrants(&self) -> [Piece; 4] {
        [self.tl, self.tr, self.bl, self.br]
    }
}

/// Left grass lip.
pub const OVERHANG_LEFT: Piece = piece(6, 0);
/// Right grass lip.
pub const OVERHANG_RIGHT: Piece = piece(7, 0);

#[inline]
const fn open(mask: u8, bit: u8) -> bool {
    mask & bit != 0
}

// Each quadrant only looks at its two orthogonal neighbours and the diagonal
// between them. Caps beat edges, edges beat inner corners.

const fn soil_tl(mask: u8) -> Piece {
    match (open(mask, N), open(mask, W)) {
        (true, true) => piece(8, 1),
        (true, false) => piece(0, 0),
        (false, true) => piece(4, 0),
        (false, false) if open(mask, NW) => piece(7, 1),
        (false, false) => piece(2, 0),
    }
}

const fn soil_tr(mask: u8) -> Piece {
    match (open(mask, N), open(mask, E)) {
        (true, true) => piece(9, 1),
        (true, false) => piece(1, 0),
        (false, true) => piece(5, 0),
        (false, false) if open(mask, NE) => piece(6, 1),
        (false, false) => piece(3, 0),
    }
}

const fn soil_bl(mask: u8) -> Piece {
    match (open(mask, S), open(mask, W)) {
        (true, true) => piece(2, 1),
        (true, false) => piece(10, 0),
        (false, true) => piece(4, 1),
        (false, false) if open(mask, SW) => piece(9, 0),
        (false, false) => piece(0, 1),
    }
}

const fn soil_br(mask: u8) -> Piece {
    match (open(mask, S), open(mask, E)) {
        (true, true) => piece(3, 1),
        (true, false) => piece(11, 0),
        (false, true) => piece(5, 1),
        (false, false) if open(mask, SE) => piece(8, 0),
        (false, false) => piece(1, 1),
    }
}

/// Resolves one neighbour mask. A tile open on all four sides keeps its caps
/// but draws no overhangs; diagonal neighbours do not change that.
pub const fn resolve_soil(mask: u8) -> SoilPieces {
    let isolated = open(mask, N) && open(mask, E) && open(mask, S) && open(mask, W);
    SoilPieces {
        tl: soil_tl(mask),
        tr: soil_tr(mask),
        bl: soil_bl(mask),
        br: soil_br(mask),
        overhang_left: !isolated && open(mask, N) && open(mask, W),
        overhang_right: !isolated && open(mask, N) && open(mask, E),
    }
}

const fn build_soil_table() -> [SoilPieces; 256] {
    let mut table = [SoilPieces::INTERIOR; 256];
    let mut mask = 0;
    while mask < 256 {
        table[mask] = resolve_soil(mask as u8);
        mask += 1;
    }
    table
}

/// Soil graphics for every neighbour mask.
pub static SOIL_TABLE: [SoilPieces; 256] = build_soil_table();

/// Builds the open-neighbour mask for `(x, y)`. Cells outside the grid count
/// as the same tile, so map borders never draw edges.
pub fn neighbour_mask(
    tiles: &TileGrid,
    x: i32,
    y: i32,
    same: impl Fn(TileId) -> bool,
) -> u8 {
    OFFSETS
        .iter()
        .filter(|(_, dx, dy)| tiles.get(x + dx, y + dy).is_some_and(|t| !same(t)))
        .fold(0, |mask, (bit, _, _)| mask | bit)
}

/// Edge variant for a spike quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpikeEdge {
    /// Nothing beside the spikes.
    Open,
    /// Solid ground beside the spikes.
    Soil,
    /// The spike strip continues.
    Spikes,
}

impl SpikeEdge {
    fn classify(neighbour: Option<TileId>) -> Self {
        match neighbour.map(TileId::kind) {
            None | Some(TileKind::Static(StaticTile::Spikes)) => SpikeEdge::Spikes,
            Some(TileKind::Static(StaticTile::Soil)) => SpikeEdge::Soil,
            _ => SpikeEdge::Open,
        }
    }

    /// Lower-left quadrant for this edge.
    pub fn left_piece(self) -> Piece {
        match self {
            SpikeEdge::Open => piece(0, 3),
            SpikeEdge::Soil => piece(2, 3),
            SpikeEdge::Spikes => piece(4, 3),
        }
    }

    /// Lower-right quadrant for this edge.
    pub fn right_piece(self) -> Piece {
        match self {
            SpikeEdge::Open => piece(1, 3),
            SpikeEdge::Soil => piece(3, 3),
            SpikeEdge::Spikes => piece(5, 3),
        }
    }
}

/// Top-left piece of the 4×4 block used by each other-solid tile.
pub fn other_solid_offset(tile: StaticTile) -> Option<Piece> {
    match tile {
        StaticTile::Stone => Some(piece(0, 6)),
        StaticTile::Lock => Some(piece(4, 6)),
        StaticTile::PurpleSolid => Some(piece(8, 6)),
        _ => None,
    }
}

/// Quadrants for an other-solid tile. Only orthogonal sides matter; each
/// open side moves the quadrant to the outer column or row of the block.
pub fn other_solid_pieces(offset: Piece, mask: u8) -> [Piece; 4] {
    let left = if open(mask, W) { 0 } else { 1 };
    let right = if open(mask, E) { 3 } else { 2 };
    let top = if open(mask, N) { 0 } else { 1 };
    let bottom = if open(mask, S) { 3 } else { 2 };
    let at = |col: u8, row: u8| piece(offset.x + col, offset.y + row);
    [at(left, top), at(right, top), at(left, bottom), at(right, bottom)]
}

const VINE_SRC_X: i32 = 96;
const SPIKE_STRIP: SrcRect = SrcRect::new(0, 16, 16, 8);
const LAVA_WAVE_Y: i32 = 32;
const LAVA_BODY: SrcRect = SrcRect::new(32, 32, 16, 16);
const PURPLE_INERT: SrcRect = SrcRect::new(48, 32, 16, 16);

/// Draws single cells of a tile grid from one atlas.
pub struct TileRenderer<'a, B> {
    /// Grid being drawn.
    pub tiles: &'a TileGrid,
    /// Tile atlas.
    pub atlas: &'a B,
    /// Lava phase source.
    pub anim: &'a AnimationState,
}

impl<'a, B> TileRenderer<'a, B> {
    /// Renderer over one frame's state.
    pub fn new(tiles: &'a TileGrid, atlas: &'a B, anim: &'a AnimationState) -> Self {
        TileRenderer { tiles, atlas, anim }
    }

    /// Draws the tile at `(x, y)`; empty, spawn and unknown cells draw nothing.
    pub fn draw_cell<R: Raster<Bitmap = B>>(&self, canvas: &mut Canvas<'_, R>, x: i32, y: i32) {
        let Some(id) = self.tiles.get(x, y) else {
            return;
        };
        let TileKind::Static(tile) = id.kind() else {
            return;
        };
        let (px, py) = (x * TILE, y * TILE);

        match tile {
            StaticTile::Soil => self.draw_soil(canvas, x, y, px, py),
            StaticTile::Vine => self.draw_vine(canvas, x, y, px, py),
            StaticTile::Lava => self.draw_lava(canvas, x, y, px, py),
            StaticTile::Spikes => self.draw_spikes(canvas, x, y, px, py),
            StaticTile::PurpleInert => canvas.region(self.atlas, PURPLE_INERT, px, py),
            StaticTile::Stone | StaticTile::Lock | StaticTile::PurpleSolid => {
                if let Some(offset) = other_solid_offset(tile) {
                    let mask = neighbour_mask(self.tiles, x, y, |t| {
                        t == id || t.is(StaticTile::Soil)
                    });
                    self.draw_quadrants(canvas, other_solid_pieces(offset, mask), px, py);
                }
            }
        }
    }

    fn draw_quadrants<R: Raster<Bitmap = B>>(
        &self,
        canvas: &mut Canvas<'_, R>,
        pieces: [Piece; 4],
        px: i32,
        py: i32,
    ) {
        let [tl, tr, bl, br] = pieces;
        canvas.region(self.atlas, tl.src(), px, py);
        canvas.region(self.atlas, tr.src(), px + PIECE, py);
        canvas.region(self.atlas, bl.src(), px, py + PIECE);
        canvas.region(self.atlas, br.src(), px + PIECE, py + PIECE);
    }

    fn draw_soil<R: Raster<Bitmap = B>>(
        &self,
        canvas: &mut Canvas<'_, R>,
        x: i32,
        y: i32,
        px: i32,
        py: i32,
    ) {
        let mask = neighbour_mask(self.tiles, x, y, |t| t.is(StaticTile::Soil));
        let pieces = &SOIL_TABLE[mask as usize];
        self.draw_quadrants(canvas, pieces.quadrants(), px, py);

        if pieces.overhang_left {
            canvas.region(self.atlas, OVERHANG_LEFT.src(), px - PIECE, py);
        }
        if pieces.overhang_right {
            canvas.region(self.atlas, OVERHANG_RIGHT.src(), px + TILE, py);
        }
    }

    fn draw_vine<R: Raster<Bitmap = B>>(
        &self,
        canvas: &mut Canvas<'_, R>,
        x: i32,
        y: i32,
        px: i32,
        py: i32,
    ) {
        // A strip caps unless the vine continues or hangs from soil.
        let anchored = |dy: i32| {
            self.tiles
                .get(x, y + dy)
                .map_or(true, |t| t.is(StaticTile::Vine) || t.is(StaticTile::Soil))
        };
        let top_x = if anchored(-1) { VINE_SRC_X } else { VINE_SRC_X + TILE };
        let bottom_x = if anchored(1) { VINE_SRC_X } else { VINE_SRC_X + TILE };

        canvas.region(self.atlas, SrcRect::new(top_x, 0, TILE, PIECE), px, py);
        canvas.region(self.atlas, SrcRect::new(bottom_x, PIECE, TILE, PIECE), px, py + PIECE);
    }

    fn draw_spikes<R: Raster<Bitmap = B>>(
        &self,
        canvas: &mut Canvas<'_, R>,
        x: i32,
        y: i32,
        px: i32,
        py: i32,
    ) {
        let left = SpikeEdge::classify(self.tiles.get(x - 1, y));
        let right = SpikeEdge::classify(self.tiles.get(x + 1, y));

        canvas.region(self.atlas, SPIKE_STRIP, px, py);
        canvas.region(self.atlas, left.left_piece().src(), px, py + PIECE);
        canvas.region(self.atlas, right.right_piece().src(), px + PIECE, py + PIECE);
    }

    fn draw_lava<R: Raster<Bitmap = B>>(
        &self,
        canvas: &mut Canvas<'_, R>,
        x: i32,
        y: i32,
        px: i32,
        py: i32,
    ) {
        let continues_up = self
            .tiles
            .get(x, y - 1)
            .map_or(true, |t| t.is(StaticTile::Lava));
        if continues_up {
            canvas.region(self.atlas, LAVA_BODY, px, py);
            return;
        }

        let off = self.anim.lava_offset();
        let bob = self.anim.lava_bob();
        for half in 0..2 {
            let src = SrcRect::new(off + half * PIECE, LAVA_WAVE_Y, PIECE, TILE);
            canvas.region(self.atlas, src, px + half * PIECE, py + bob);
        }
    }
}
