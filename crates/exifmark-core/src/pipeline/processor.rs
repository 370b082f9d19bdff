//! Watermark compositing: the per-file pipeline from input photo to output JPEG.

use ab_glyph::FontArc;
use image::{DynamicImage, RgbaImage};
use std::path::Path;

use crate::config::Config;
use crate::error::{PipelineResult, Result};
use crate::render::{load_font, RasterCanvas};
use crate::types::{ComposeReport, Metadata, WatermarkConfig};
use crate::watermark::{draw_watermark, Overlay};

use super::decode::ImageDecoder;
use super::encode::JpegWriter;
use super::metadata::MetadataExtractor;
use super::validate::Validator;

/// Composites camera settings onto photos and writes them as JPEG.
///
/// Holds no per-file state; one instance can serve any number of files and
/// is safe to share between threads as long as output paths differ.
pub struct WatermarkCompositor {
    decoder: ImageDecoder,
    validator: Validator,
    writer: JpegWriter,
    font: FontArc,
}

impl WatermarkCompositor {
    /// Create a compositor from configuration.
    ///
    /// Fails only when a configured font override cannot be loaded.
    pub fn new(config: &Config) -> Result<Self> {
        let font = load_font(config.font_path().as_deref())?;
        Ok(Self {
            decoder: ImageDecoder::new(config.limits.clone()),
            validator: Validator::new(config.limits.clone()),
            writer: JpegWriter::default(),
            font,
        })
    }

    /// Compositor with default limits and the embedded font.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&Config::default())
    }

    /// Watermark `input` and write the result to `output`.
    ///
    /// Returns `false` on any failure; the cause is logged and no output is left behind.
    pub fn compose(&self, input: &Path, output: &Path, config: &WatermarkConfig) -> bool {
        match self.try_compose(input, output, config) {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Error processing image: {}", e);
                false
            }
        }
    }

    /// Like [`compose`](Self::compose), but with the error and a report of what was drawn.
    pub fn try_compose(
        &self,
        input: &Path,
        output: &Path,
        config: &WatermarkConfig,
    ) -> PipelineResult<ComposeReport> {
        let start = std::time::Instant::now();
        tracing::debug!("Compositing: {:?} -> {:?}", input, output);

        let metadata = MetadataExtractor::extract(input);

        self.validator.validate(input)?;
        let decoded = self.decoder.decode(input)?;

        let (rendered, overlay) = self.render(&decoded.image, &metadata, config);
        self.writer.write(&rendered, output)?;

        tracing::debug!(
            "Composited {:?} in {:?} ({}x{})",
            input,
            start.elapsed(),
            decoded.width,
            decoded.height
        );

        Ok(ComposeReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            width: decoded.width,
            height: decoded.height,
            watermark_text: overlay
                .as_ref()
                .map(|o| o.text.clone())
                .unwrap_or_default(),
            logo: overlay.as_ref().map(|o| o.logo.clone()),
            overlay_drawn: overlay.is_some(),
            metadata,
        })
    }

    /// Draw `source` plus its watermark into a new buffer of the same size.
    pub fn render(
        &self,
        source: &DynamicImage,
        metadata: &Metadata,
        config: &WatermarkConfig,
    ) -> (RgbaImage, Option<Overlay>) {
        let mut canvas = RasterCanvas::new(source.width(), source.height(), self.font.clone());
        let overlay = draw_watermark(&mut canvas, source, metadata, config);
        (canvas.into_image(), overlay)
    }
}
