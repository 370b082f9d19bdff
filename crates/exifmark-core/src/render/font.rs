//! Overlay font loading and sizing.

use ab_glyph::{Font, FontArc, PxScale};
use std::path::Path;

use crate::error::ConfigError;

/// DejaVu Sans, used when no font override is configured.
const EMBEDDED_FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Load the overlay font: the file at `path` if given, the embedded face otherwise.
pub fn load_font(path: Option<&Path>) -> Result<FontArc, ConfigError> {
    match path {
        Some(path) => {
            let data = std::fs::read(path).map_err(|e| ConfigError::FontError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            let font = FontArc::try_from_vec(data).map_err(|e| ConfigError::FontError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            tracing::debug!("Loaded overlay font from {:?}", path);
            Ok(font)
        }
        None => FontArc::try_from_slice(EMBEDDED_FONT_DATA).map_err(|e| ConfigError::FontError {
            path: "<embedded>".into(),
            message: e.to_string(),
        }),
    }
}

/// Scale for an em size of `px` pixels.
///
/// `PxScale` is the height of the ascent-to-descent box, not the em square,
/// so it is stretched by the font's height-to-em ratio.
pub fn em_scale<F: Font>(font: &F, px: f32) -> PxScale {
    match font.units_per_em() {
        Some(units) if units > 0.0 => PxScale::from(px * font.height_unscaled() / units),
        _ => PxScale::from(px),
    }
}
