//! Software canvas over an RGBA buffer.

use ab_glyph::{point, Font, FontArc, GlyphId, ScaleFont};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use super::font::em_scale;
use super::{Canvas, Rect, TextSize};

/// Camera pictograph; few text fonts carry it.
const CAMERA: char = '\u{1F4F7}';

/// Horizontal margin either side of the drawn camera, in ems.
const CAMERA_INSET: f32 = 0.05;

/// Height of the drawn camera above the baseline, in ems.
const CAMERA_HEIGHT: f32 = 0.75;

/// Samples per pixel axis when rasterizing the camera.
const SUBSAMPLES: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Glyph {
    Outline(GlyphId),
    /// Vector camera, advance of one em.
    Camera,
}

/// Canvas that rasterizes into an in-memory RGBA image.
pub struct RasterCanvas {
    buffer: RgbaImage,
    font: FontArc,
}

impl RasterCanvas {
    /// A fully transparent canvas.
    pub fn new(width: u32, height: u32, font: FontArc) -> Self {
        Self {
            buffer: RgbaImage::new(width, height),
            font,
        }
    }

    /// Take the rendered pixels.
    pub fn into_image(self) -> RgbaImage {
        self.buffer
    }

    /// The font's glyph for `c`, or the drawn camera when the font lacks it.
    fn resolve(&self, c: char) -> Glyph {
        let id = self.font.glyph_id(c);
        if id.0 == 0 && c == CAMERA {
            Glyph::Camera
        } else {
            Glyph::Outline(id)
        }
    }

    /// Rasterize the camera icon one em wide, sitting on `baseline`.
    fn draw_camera(&mut self, x: f32, baseline: f32, size: f32, color: Rgba<u8>) {
        let left = x + CAMERA_INSET * size;
        let width = (1.0 - 2.0 * CAMERA_INSET) * size;
        let height = CAMERA_HEIGHT * size;
        let top = baseline - height;
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let step = 1.0 / SUBSAMPLES as f32;
        for py in top.floor() as i64..(top + height).ceil() as i64 {
            for px in left.floor() as i64..(left + width).ceil() as i64 {
                let mut hits = 0u32;
                for sy in 0..SUBSAMPLES {
                    for sx in 0..SUBSAMPLES {
                        let u = (px as f32 + (sx as f32 + 0.5) * step - left) / width;
                        let v = (py as f32 + (sy as f32 + 0.5) * step - top) / height;
                        if camera_covers(u, v, width / height) {
                            hits += 1;
                        }
                    }
                }
                let coverage = hits as f32 / (SUBSAMPLES * SUBSAMPLES) as f32;
                let alpha = (coverage * color[3] as f32).round() as u8;
                if alpha > 0 {
                    self.blend_at(px, py, Rgba([color[0], color[1], color[2], alpha]));
                }
            }
        }
    }

    fn blend_at(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x < 0 || y < 0 || x >= self.buffer.width() as i64 || y >= self.buffer.height() as i64 {
            return;
        }
        let pixel = self.buffer.get_pixel_mut(x as u32, y as u32);
        *pixel = blend_pixels(*pixel, color);
    }
}

impl Canvas for RasterCanvas {
    fn draw_image(&mut self, image: &DynamicImage) {
        let (width, height) = image.dimensions();
        let width = width.min(self.buffer.width());
        let height = height.min(self.buffer.height());
        for y in 0..height {
            for x in 0..width {
                let src = image.get_pixel(x, y);
                self.blend_at(x as i64, y as i64, src);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        // Pixels whose centers fall inside the rectangle.
        let x0 = rect.x.round().max(0.0) as i64;
        let y0 = rect.y.round().max(0.0) as i64;
        let x1 = (rect.right().round() as i64).min(self.buffer.width() as i64);
        let y1 = (rect.bottom().round() as i64).min(self.buffer.height() as i64);

        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_at(x, y, color);
            }
        }
    }

    fn measure_text(&self, text: &str, size: f32) -> TextSize {
        let scaled = self.font.as_scaled(em_scale(&self.font, size));

        let mut width = 0.0f32;
        let mut prev: Option<GlyphId> = None;
        for c in text.chars() {
            let id = match self.resolve(c) {
                Glyph::Outline(id) => id,
                Glyph::Camera => {
                    width += size;
                    prev = None;
                    continue;
                }
            };
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }

        TextSize {
            width,
            height: scaled.height() + scaled.line_gap(),
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba<u8>) {
        let scale = em_scale(&self.font, size);
        let font = self.font.clone();
        let scaled = font.as_scaled(scale);
        let baseline = y + scaled.ascent();

        let mut cursor = x;
        let mut prev: Option<GlyphId> = None;
        for c in text.chars() {
            let id = match self.resolve(c) {
                Glyph::Outline(id) => id,
                Glyph::Camera => {
                    self.draw_camera(cursor, baseline, size, color);
                    cursor += size;
                    prev = None;
                    continue;
                }
            };
            if let Some(prev) = prev {
                cursor += scaled.kern(prev, id);
            }

            let glyph = id.with_scale_and_position(scale, point(cursor, baseline));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let alpha = (coverage.clamp(0.0, 1.0) * color[3] as f32).round() as u8;
                    if alpha > 0 {
                        self.blend_at(
                            px as i64 + bounds.min.x as i64,
                            py as i64 + bounds.min.y as i64,
                            Rgba([color[0], color[1], color[2], alpha]),
                        );
                    }
                });
            }

            cursor += scaled.h_advance(id);
            prev = Some(id);
        }
    }
}

/// Camera silhouette in the unit icon box, `v` growing downward.
///
/// A body with a lens ring cut out of it and a viewfinder hump on top.
/// `aspect` is the box's width over its height; the ring is round in pixels.
fn camera_covers(u: f32, v: f32, aspect: f32) -> bool {
    let body = (0.0..=1.0).contains(&u) && (0.2..=1.0).contains(&v);
    let hump = (0.3..=0.6).contains(&u) && (0.0..0.2).contains(&v);

    let dx = (u - 0.5) * aspect;
    let dy = v - 0.6;
    let r = (dx * dx + dy * dy).sqrt();
    let ring = r > 0.16 && r < 0.26;

    (body && !ring) || hump
}

/// Straight-alpha source-over.
pub(crate) fn blend_pixels(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let src_a = src[3] as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= f32::EPSILON {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |s: u8, d: u8| -> u8 {
        let value = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::load_font;

    fn canvas(width: u32, height: u32) -> RasterCanvas {
        RasterCanvas::new(width, height, load_font(None).unwrap())
    }

    #[test]
    fn test_blend_opaque_and_transparent_sources() {
        let dst = Rgba([10, 20, 30, 255]);
        assert_eq!(blend_pixels(dst, Rgba([200, 100, 50, 255])), Rgba([200, 100, 50, 255]));
        assert_eq!(blend_pixels(dst, Rgba([200, 100, 50, 0])), dst);
    }

    #[test]
    fn test_blend_black_180_over_white() {
        let out = blend_pixels(Rgba([255, 255, 255, 255]), Rgba([0, 0, 0, 180]));
        // 255 * (1 - 180/255) = 75
        assert_eq!(out, Rgba([75, 75, 75, 255]));
    }

    #[test]
    fn test_blend_onto_transparent_keeps_color() {
        let out = blend_pixels(Rgba([0, 0, 0, 0]), Rgba([90, 120, 200, 128]));
        assert_eq!(out, Rgba([90, 120, 200, 128]));
    }

    #[test]
    fn test_draw_image_copies_pixels_exactly() {
        let mut source = RgbaImage::new(5, 4);
        for (x, y, pixel) in source.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 40) as u8, (y * 60) as u8, 7, 255]);
        }
        let source = DynamicImage::ImageRgba8(source);

        let mut canvas = canvas(5, 4);
        canvas.draw_image(&source);
        assert_eq!(canvas.into_image(), source.to_rgba8());
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut canvas = canvas(10, 10);
        canvas.fill_rect(Rect::new(-5.0, 8.0, 100.0, 100.0), Rgba([255, 0, 0, 255]));
        let image = canvas.into_image();

        assert_eq!(*image.get_pixel(0, 8), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(9, 9), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(9, 7), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_fill_rect_rounds_edges() {
        let mut canvas = canvas(10, 10);
        canvas.fill_rect(Rect::new(1.4, 1.6, 2.2, 2.0), Rgba([0, 255, 0, 255]));
        let image = canvas.into_image();

        // x covers [1, 4), y covers [2, 4)
        assert_eq!(image.get_pixel(1, 2)[3], 255);
        assert_eq!(image.get_pixel(3, 3)[3], 255);
        assert_eq!(image.get_pixel(4, 3)[3], 0);
        assert_eq!(image.get_pixel(1, 1)[3], 0);
    }

    #[test]
    fn test_measure_text_grows_with_size_and_length() {
        let canvas = canvas(1, 1);
        let small = canvas.measure_text("ISO 400", 10.0);
        let large = canvas.measure_text("ISO 400", 20.0);
        let longer = canvas.measure_text("ISO 400  1/250", 10.0);

        assert!(small.width > 0.0 && small.height > 0.0);
        assert!((large.width - 2.0 * small.width).abs() < 0.5);
        assert!((large.height - 2.0 * small.height).abs() < 0.5);
        assert!(longer.width > small.width);
        assert_eq!(canvas.measure_text("", 10.0).width, 0.0);
    }

    #[test]
    fn test_draw_text_marks_pixels_inside_layout_box() {
        let mut canvas = canvas(200, 60);
        let size = canvas.measure_text("f/2.8", 24.0);
        canvas.draw_text("f/2.8", 10.0, 10.0, 24.0, Rgba([255, 255, 255, 255]));
        let image = canvas.into_image();

        let mut painted = 0;
        for (x, y, pixel) in image.enumerate_pixels() {
            if pixel[3] > 0 {
                painted += 1;
                assert!(x as f32 >= 9.0 && (x as f32) <= 10.0 + size.width + 1.0);
                assert!(y as f32 >= 9.0 && (y as f32) <= 10.0 + size.height + 1.0);
                assert_eq!((pixel[0], pixel[1], pixel[2]), (255, 255, 255));
            }
        }
        assert!(painted > 20);
    }

    #[test]
    fn test_camera_pictograph_resolves_without_font_glyph() {
        let canvas = canvas(1, 1);
        let pictograph = crate::watermark::CAMERA_PICTOGRAPH;
        assert_eq!(pictograph.chars().collect::<Vec<_>>(), vec![CAMERA]);

        // The embedded face has no camera; it is drawn instead of the missing glyph.
        assert_eq!(canvas.font.glyph_id(CAMERA).0, 0);
        assert_eq!(canvas.resolve(CAMERA), Glyph::Camera);
        assert!(matches!(canvas.resolve('N'), Glyph::Outline(id) if id.0 != 0));

        let measured = canvas.measure_text(pictograph, 20.0);
        assert_eq!(measured.width, 20.0);
        assert_eq!(measured.height, canvas.measure_text("N", 20.0).height);
    }

    #[test]
    fn test_draw_camera_pictograph_shape() {
        let mut canvas = canvas(100, 100);
        let white = Rgba([255, 255, 255, 255]);
        canvas.draw_text(crate::watermark::CAMERA_PICTOGRAPH, 0.0, 0.0, 80.0, white);
        let image = canvas.into_image();

        // Size 80: ascent ~74, so the icon spans x 4..76 and y ~14..74.
        assert_eq!(image.get_pixel(40, 50)[3], 255, "lens center is filled");
        assert_eq!(image.get_pixel(52, 50)[3], 0, "lens ring is cut out");
        assert_eq!(image.get_pixel(10, 70)[3], 255, "body corner is filled");
        assert_eq!(image.get_pixel(10, 20)[3], 0, "no hump at the left edge");
        assert_eq!(image.get_pixel(34, 20)[3], 255, "viewfinder hump");
        assert_eq!(image.get_pixel(90, 50)[3], 0, "nothing past the advance");
    }

    #[test]
    fn test_camera_covers_shape() {
        assert!(camera_covers(0.5, 0.6, 1.2));
        assert!(!camera_covers(0.5 + 0.2 / 1.2, 0.6, 1.2));
        assert!(camera_covers(0.05, 0.95, 1.2));
        assert!(camera_covers(0.45, 0.1, 1.2));
        assert!(!camera_covers(0.9, 0.1, 1.2));
        assert!(!camera_covers(1.2, 0.5, 1.2));
    }
}
