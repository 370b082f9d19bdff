//! Overlay geometry, proportional to image height.

use image::Rgba;

use crate::render::{Rect, TextSize};
use crate::types::Position;

/// Font size as a fraction of image height.
pub const FONT_SIZE_RATIO: f32 = 0.025;
/// Padding as a fraction of image height.
pub const PADDING_RATIO: f32 = 0.015;
/// Logo em size relative to the text font size.
pub const LOGO_SCALE: f32 = 1.8;

/// Background box color: black at 180/255 opacity.
pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 180]);
/// Text and logo color.
pub const FOREGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Where each overlay element goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkLayout {
    pub font_size: f32,
    pub padding: f32,
    pub logo_size: f32,
    /// Top of the text line
    pub y: f32,
    pub background: Rect,
    pub logo_origin: (f32, f32),
    pub text_origin: (f32, f32),
}

impl WatermarkLayout {
    /// Font and logo sizes for an image of the given height.
    pub fn sizes(image_height: u32) -> (f32, f32, f32) {
        let h = image_height as f32;
        let font_size = h * FONT_SIZE_RATIO;
        let padding = h * PADDING_RATIO;
        (font_size, padding, font_size * LOGO_SCALE)
    }

    /// Lay out the overlay given the measured text at `font_size`.
    pub fn compute(image_height: u32, text: TextSize, position: Position) -> Self {
        let (font_size, padding, logo_size) = Self::sizes(image_height);

        let y = match position {
            Position::Bottom => image_height as f32 - text.height - padding * 2.0,
            Position::Top => padding,
        };

        let background = Rect::new(
            padding,
            y - padding,
            text.width + logo_size + padding * 3.0,
            text.height + padding * 2.0,
        );

        Self {
            font_size,
            padding,
            logo_size,
            y,
            background,
            logo_origin: (padding * 2.0, y),
            text_origin: (padding * 3.0 + logo_size, y),
        }
    }
}
