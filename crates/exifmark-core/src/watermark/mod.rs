//! Camera-settings watermark.
//!
//! Builds the overlay line from [`Metadata`], picks a manufacturer logo, lays
//! both out relative to the image height and draws them on a [`Canvas`]:
//!
//! ```text
//!  ┌──────────────────────────────────────────┐
//!  │ NIKON  f/2.8  ISO 400  1/250             │  black, alpha 180
//!  └──────────────────────────────────────────┘
//! ```

pub mod layout;
pub mod text;

pub use layout::WatermarkLayout;
pub use text::{build_watermark_text, logo_for_manufacturer, CAMERA_PICTOGRAPH};

use image::DynamicImage;

use crate::render::Canvas;
use crate::types::{Metadata, WatermarkConfig};

/// What was drawn on top of the photo.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub text: String,
    pub logo: String,
    pub layout: WatermarkLayout,
}

/// Draw `source` followed by the watermark for `metadata`.
///
/// Returns `None` when the overlay text is blank; the canvas then holds an
/// untouched copy of the source.
pub fn draw_watermark(
    canvas: &mut dyn Canvas,
    source: &DynamicImage,
    metadata: &Metadata,
    config: &WatermarkConfig,
) -> Option<Overlay> {
    canvas.draw_image(source);

    let text = build_watermark_text(metadata, config);
    if text.trim().is_empty() {
        tracing::debug!("No watermark fields to show, passing image through");
        return None;
    }

    let (font_size, _, _) = WatermarkLayout::sizes(source.height());
    let measured = canvas.measure_text(&text, font_size);
    let layout = WatermarkLayout::compute(source.height(), measured, config.position);
    let logo = logo_for_manufacturer(&metadata.manufacturer);

    tracing::debug!(
        text = %text,
        logo = %logo,
        y = layout.y,
        "Drawing watermark"
    );

    canvas.fill_rect(layout.background, layout::BACKGROUND);
    canvas.draw_text(
        &logo,
        layout.logo_origin.0,
        layout.logo_origin.1,
        layout.logo_size,
        layout::FOREGROUND,
    );
    canvas.draw_text(
        &text,
        layout.text_origin.0,
        layout.text_origin.1,
        layout.font_size,
        layout::FOREGROUND,
    );

    Some(Overlay { text, logo, layout })
}
