//! Drawing surface used to composite the overlay.
//!
//! The watermark code only talks to the [`Canvas`] trait: copy the source
//! photo, fill a translucent rectangle, measure and draw text. The raster
//! implementation draws into an `RgbaImage` with an `ab_glyph` font; tests
//! substitute a recording canvas to check layout without rasterizing.

pub mod font;
pub mod raster;

pub use font::{em_scale, load_font};
pub use raster::RasterCanvas;

use image::{DynamicImage, Rgba};

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Measured extent of a single line of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

/// A surface the overlay is drawn on.
///
/// Colors are straight (non-premultiplied) RGBA; drawing blends source-over.
pub trait Canvas {
    /// Draw `image` at the origin at its native size.
    fn draw_image(&mut self, image: &DynamicImage);

    /// Fill `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>);

    /// Measure one line of text at an em size of `size` pixels.
    fn measure_text(&self, text: &str, size: f32) -> TextSize;

    /// Draw one line of text with its layout box's top-left at (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba<u8>);
}
