//! [`Raster`] backed by Macroquad textures.

use super::{Bitmap, Flip, Raster, SrcRect};
use macroquad::prelude::*;

impl Bitmap for Texture2D {
    fn width(&self) -> u32 {
        Texture2D::width(self) as u32
    }

    fn height(&self) -> u32 {
        Texture2D::height(self) as u32
    }
}

/// Draws through macroquad's immediate-mode texture calls.
#[derive(Debug, Clone, Copy)]
pub struct MacroquadRaster {
    /// Pixel scale from canvas to screen.
    pub scale: f32,
    /// Colour multiplied into every blit.
    pub tint: Color,
}

impl Default for MacroquadRaster {
    fn default() -> Self {
        MacroquadRaster {
            scale: 1.0,
            tint: WHITE,
        }
    }
}

impl MacroquadRaster {
    /// White-tinted raster at `scale`.
    pub fn with_scale(scale: f32) -> Self {
        MacroquadRaster {
            scale,
            ..Default::default()
        }
    }
}

impl Raster for MacroquadRaster {
    type Bitmap = Texture2D;

    fn draw_region(&mut self, bitmap: &Texture2D, src: SrcRect, dx: i32, dy: i32, flip: Flip) {
        draw_texture_ex(
            bitmap,
            dx as f32 * self.scale,
            dy as f32 * self.scale,
            self.tint,
            DrawTextureParams {
                source: Some(Rect::new(
                    src.x as f32,
                    src.y as f32,
                    src.w as f32,
                    src.h as f32,
                )),
                dest_size: Some(vec2(src.w as f32 * self.scale, src.h as f32 * self.scale)),
                flip_x: flip.flip_h(),
                flip_y: flip.flip_v(),
                ..Default::default()
            },
        );
    }

    fn draw_bitmap(&mut self, bitmap: &Texture2D, dx: i32, dy: i32, flip: Flip) {
        draw_texture_ex(
            bitmap,
            dx as f32 * self.scale,
            dy as f32 * self.scale,
            self.tint,
            DrawTextureParams {
                dest_size: Some(vec2(
                    Texture2D::width(bitmap) * self.scale,
                    Texture2D::height(bitmap) * self.scale,
                )),
                flip_x: flip.flip_h(),
                flip_y: flip.flip_v(),
                ..Default::default()
            },
        );
    }
}
