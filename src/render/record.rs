//! Recording raster for headless runs and tests.

use super::{Bitmap, Flip, Raster, SrcRect};

/// Bitmap stand-in for headless use: a name and a size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBitmap {
    /// Name copied into each [`Blit`].
    pub name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TestBitmap {
    /// Bitmap named `name` of the given size.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        TestBitmap {
            name: name.into(),
            width,
            height,
        }
    }
}

impl Bitmap for TestBitmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blit {
    /// Source bitmap name.
    pub bitmap: String,
    /// `None` for whole-bitmap draws.
    pub src: Option<SrcRect>,
    /// Destination x after translation.
    pub dx: i32,
    /// Destination y after translation.
    pub dy: i32,
    /// Mirroring requested.
    pub flip: Flip,
}

/// Raster that records blits instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingRaster {
    /// Draw calls in issue order.
    pub blits: Vec<Blit>,
}

impl RecordingRaster {
    /// Raster with no blits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets recorded blits.
    pub fn clear(&mut self) {
        self.blits.clear();
    }

    /// Blits taken from the named bitmap.
    pub fn blits_from<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Blit> + 'a {
        self.blits.iter().filter(move |b| b.bitmap == name)
    }
}

impl Raster for RecordingRaster {
    type Bitmap = TestBitmap;

    fn draw_region(&mut self, bitmap: &TestBitmap, src: SrcRect, dx: i32, dy: i32, flip: Flip) {
        self.blits.push(Blit {
            bitmap: bitmap.name.clone(),
            src: Some(src),
            dx,
            dy,
            flip,
        });
    }

    fn draw_bitmap(&mut self, bitmap: &TestBitmap, dx: i32, dy: i32, flip: Flip) {
        self.blits.push(Blit {
            bitmap: bitmap.name.clone(),
            src: None,
            dx,
            dy,
            flip,
        });
    }
}
