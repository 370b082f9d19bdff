//! JPEG output.

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage, RgbaImage};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::PipelineError;

/// Highest JPEG quality, used for every output.
pub const JPEG_QUALITY: u8 = 100;

/// Writes rendered images as JPEG files.
pub struct JpegWriter {
    quality: u8,
}

impl Default for JpegWriter {
    fn default() -> Self {
        Self {
            quality: JPEG_QUALITY,
        }
    }
}

impl JpegWriter {
    /// Encode `image` to `output`, replacing any existing file.
    ///
    /// The data goes to a temporary file next to `output` first, so a failed
    /// encode never leaves a truncated JPEG behind.
    pub fn write(&self, image: &RgbaImage, output: &Path) -> Result<(), PipelineError> {
        let rgb = flatten(image);

        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let encode_err = |message: String| PipelineError::Encode {
            path: output.to_path_buf(),
            message,
        };

        let tmp = tempfile::Builder::new()
            .prefix(".exifmark-")
            .suffix(".jpg.tmp")
            .tempfile_in(dir)
            .map_err(|e| encode_err(format!("Cannot create temp file in {:?}: {}", dir, e)))?;

        {
            let mut writer = BufWriter::new(tmp.as_file());
            JpegEncoder::new_with_quality(&mut writer, self.quality)
                .encode_image(&rgb)
                .map_err(|e| encode_err(e.to_string()))?;
            writer.flush().map_err(|e| encode_err(e.to_string()))?;
        }

        tmp.persist(output)
            .map_err(|e| encode_err(format!("Cannot write output: {}", e.error)))?;

        tracing::debug!("Wrote {:?} (quality {})", output, self.quality);
        Ok(())
    }
}

/// Drop the alpha channel as a premultiplied surface would: color scaled by alpha.
pub fn flatten(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        if a == 255 {
            return Rgb([r, g, b]);
        }
        let scale = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
        Rgb([scale(r), scale(g), scale(b)])
    })
}
