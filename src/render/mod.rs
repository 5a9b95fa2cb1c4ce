//! Raster seam. The stage never touches a graphics API directly; it issues
//! region and bitmap blits through [`Raster`].

pub mod autotile;
pub mod macroquad_raster;
pub mod record;

pub use macroquad_raster::MacroquadRaster;
pub use record::{Blit, RecordingRaster, TestBitmap};

/// Anything with pixel dimensions.
pub trait Bitmap {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
}

/// Mirroring applied to a blit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    /// Drawn as stored.
    #[default]
    None,
    /// Mirrored left to right.
    Horizontal,
    /// Mirrored top to bottom.
    Vertical,
    /// Rotated half a turn.
    Both,
}

impl Flip {
    /// Mirrored left to right.
    #[inline]
    pub fn flip_h(self) -> bool {
        matches!(self, Flip::Horizontal | Flip::Both)
    }

    /// Mirrored top to bottom.
    #[inline]
    pub fn flip_v(self) -> bool {
        matches!(self, Flip::Vertical | Flip::Both)
    }
}

/// Source rectangle in bitmap pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrcRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl SrcRect {
    /// Rectangle at `(x, y)` of size `w`×`h`.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        SrcRect { x, y, w, h }
    }
}

/// Drawing primitive supplied by the host.
pub trait Raster {
    /// Bitmap type this backend draws from.
    type Bitmap: Bitmap;

    /// Copies `src` out of `bitmap` with its top-left at `(dx, dy)`.
    fn draw_region(&mut self, bitmap: &Self::Bitmap, src: SrcRect, dx: i32, dy: i32, flip: Flip);

    /// Draws the whole bitmap with its top-left at `(dx, dy)`.
    fn draw_bitmap(&mut self, bitmap: &Self::Bitmap, dx: i32, dy: i32, flip: Flip);
}

/// Raster plus a translation applied to every blit.
pub struct Canvas<'r, R: Raster> {
    raster: &'r mut R,
    origin: (i32, i32),
}

impl<'r, R: Raster> Canvas<'r, R> {
    /// Canvas whose blits are shifted by `origin`.
    pub fn new(raster: &'r mut R, origin: (i32, i32)) -> Self {
        Canvas { raster, origin }
    }

    /// Blits `src` from `bitmap`.
    #[inline]
    pub fn region(&mut self, bitmap: &R::Bitmap, src: SrcRect, dx: i32, dy: i32) {
        self.raster.draw_region(
            bitmap,
            src,
            dx + self.origin.0,
            dy + self.origin.1,
            Flip::None,
        );
    }

    /// Blits all of `bitmap`.
    #[inline]
    pub fn bitmap(&mut self, bitmap: &R::Bitmap, dx: i32, dy: i32) {
        self.raster
            .draw_bitmap(bitmap, dx + self.origin.0, dy + self.origin.1, Flip::None);
    }
}
