//! Overlay text and logo selection.

use crate::types::{Metadata, WatermarkConfig};

/// Glyph shown when the manufacturer is unknown.
pub const CAMERA_PICTOGRAPH: &str = "\u{1F4F7}";

/// Separator between the parts of the overlay text.
const SEPARATOR: &str = "  ";

/// Build the overlay line: aperture, `ISO n`, shutter speed.
///
/// A part is included only when it is enabled and its field is non-blank.
/// Returns the empty string when nothing qualifies.
pub fn build_watermark_text(metadata: &Metadata, config: &WatermarkConfig) -> String {
    let mut parts = Vec::with_capacity(3);

    if config.show_aperture && !is_blank(&metadata.aperture) {
        parts.push(metadata.aperture.clone());
    }
    if config.show_iso && !is_blank(&metadata.iso) {
        parts.push(format!("ISO {}", metadata.iso));
    }
    if config.show_shutter_speed && !is_blank(&metadata.shutter_speed) {
        parts.push(metadata.shutter_speed.clone());
    }

    parts.join(SEPARATOR)
}

/// Pick the logo text for a manufacturer string.
pub fn logo_for_manufacturer(manufacturer: &str) -> String {
    if is_blank(manufacturer) {
        return CAMERA_PICTOGRAPH.to_string();
    }

    let lower = manufacturer.to_lowercase();
    for brand in ["nikon", "canon", "sony"] {
        if lower.contains(brand) {
            return brand.to_uppercase();
        }
    }

    manufacturer.to_uppercase()
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
