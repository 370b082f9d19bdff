//! EXIF metadata extraction from images.

use exif::{Context, Exif, In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::types::Metadata;

/// Extracts camera metadata from image files.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extract the watermark fields from an image file.
    ///
    /// Never fails: an unreadable file, a file without EXIF, or a missing
    /// directory all produce empty strings for the affected fields. The cause
    /// is only visible in the logs.
    pub fn extract(path: &Path) -> Metadata {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Cannot open {:?} for EXIF: {}", path, e);
                return Metadata::default();
            }
        };

        let mut reader = BufReader::new(file);
        match Reader::new().read_from_container(&mut reader) {
            Ok(exif) => Self::from_exif(&exif),
            Err(exif::Error::NotFound(_)) => {
                tracing::debug!("No EXIF data in {:?}", path);
                Metadata::default()
            }
            Err(e) => {
                tracing::warn!("Error reading EXIF data from {:?}: {}", path, e);
                Metadata::default()
            }
        }
    }

    /// Read the five fields out of parsed EXIF.
    pub(crate) fn from_exif(exif: &Exif) -> Metadata {
        let mut data = Metadata::default();

        // Camera body tags live in IFD0.
        if Self::has_directory(exif, Context::Tiff) {
            data.manufacturer = Self::describe(exif, Tag::Make).unwrap_or_default();
            data.model = Self::describe(exif, Tag::Model).unwrap_or_default();
        }

        // Capture parameters live in the Exif sub-IFD.
        if Self::has_directory(exif, Context::Exif) {
            if let Some(aperture) = Self::describe(exif, Tag::FNumber) {
                data.aperture = format_aperture(&aperture);
            }
            if let Some(iso) = Self::describe(exif, Tag::PhotographicSensitivity) {
                data.iso = iso;
            }
            if let Some(shutter) = Self::describe(exif, Tag::ExposureTime) {
                data.shutter_speed = shutter;
            }
        }

        data
    }

    /// Whether the primary image carries any tag from the given directory.
    fn has_directory(exif: &Exif, context: Context) -> bool {
        exif.fields()
            .any(|f| f.ifd_num == In::PRIMARY && f.tag.context() == context)
    }

    /// Human-readable description of a tag, `None` if absent or blank.
    fn describe(exif: &Exif, tag: Tag) -> Option<String> {
        exif.get_field(tag, In::PRIMARY)
            .map(|f| clean_description(&f.display_value().to_string()))
            .filter(|s| !s.is_empty())
    }
}

/// Strip the quoting the description engine puts around ASCII values.
fn clean_description(raw: &str) -> String {
    raw.trim().trim_matches('"').trim().to_string()
}

/// Render an F-number description as "f/N".
fn format_aperture(description: &str) -> String {
    if description.starts_with("f/") {
        description.to_string()
    } else {
        format!("f/{}", description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{exif_jpeg, write_png, ExifValue};

    #[test]
    fn test_extract_missing_file() {
        let meta = MetadataExtractor::extract(Path::new("/nonexistent/file.jpg"));
        assert_eq!(meta, Metadata::default());
    }

    #[test]
    fn test_extract_file_without_exif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.png");
        write_png(&path, 64, 48);

        let meta = MetadataExtractor::extract(&path);
        assert!(meta.is_empty());
        assert_eq!(meta.aperture, "");
        assert_eq!(meta.iso, "");
        assert_eq!(meta.shutter_speed, "");
        assert_eq!(meta.manufacturer, "");
        assert_eq!(meta.model, "");
    }

    #[test]
    fn test_extract_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.jpg");
        std::fs::write(&path, b"\xFF\xD8\xFF\xE1\x00\x10Exif\x00\x00garbage").unwrap();

        let meta = MetadataExtractor::extract(&path);
        assert!(meta.is_empty());
    }

    #[test]
    fn test_extract_full_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nikon.jpg");
        let bytes = exif_jpeg(
            32,
            24,
            &[
                (Tag::Make, ExifValue::Ascii("NIKON CORPORATION")),
                (Tag::Model, ExifValue::Ascii("NIKON Z 6")),
            ],
            &[
                (Tag::ExposureTime, ExifValue::Rational(1, 250)),
                (Tag::FNumber, ExifValue::Rational(28, 10)),
                (Tag::PhotographicSensitivity, ExifValue::Short(400)),
            ],
        );
        std::fs::write(&path, bytes).unwrap();

        let meta = MetadataExtractor::extract(&path);
        assert_eq!(meta.manufacturer, "NIKON CORPORATION");
        assert_eq!(meta.model, "NIKON Z 6");
        assert_eq!(meta.aperture, "f/2.8");
        assert_eq!(meta.iso, "400");
        assert_eq!(meta.shutter_speed, "1/250");
    }

    #[test]
    fn test_extract_without_exif_sub_ifd() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body_only.jpg");
        let bytes = exif_jpeg(
            16,
            16,
            &[(Tag::Make, ExifValue::Ascii("Canon"))],
            &[],
        );
        std::fs::write(&path, bytes).unwrap();

        let meta = MetadataExtractor::extract(&path);
        assert_eq!(meta.manufacturer, "Canon");
        assert_eq!(meta.model, "");
        assert_eq!(meta.aperture, "");
        assert_eq!(meta.iso, "");
        assert_eq!(meta.shutter_speed, "");
    }

    #[test]
    fn test_extract_partial_capture_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iso_only.jpg");
        let bytes = exif_jpeg(
            16,
            16,
            &[],
            &[(Tag::PhotographicSensitivity, ExifValue::Short(3200))],
        );
        std::fs::write(&path, bytes).unwrap();

        let meta = MetadataExtractor::extract(&path);
        assert_eq!(meta.iso, "3200");
        assert_eq!(meta.aperture, "");
        assert_eq!(meta.manufacturer, "");
    }

    #[test]
    fn test_clean_description_strips_quotes() {
        assert_eq!(clean_description("\"SONY\""), "SONY");
        assert_eq!(clean_description("  \"NIKON CORPORATION \" "), "NIKON CORPORATION");
        assert_eq!(clean_description("\"\""), "");
    }

    #[test]
    fn test_format_aperture() {
        assert_eq!(format_aperture("2.8"), "f/2.8");
        assert_eq!(format_aperture("8"), "f/8");
        assert_eq!(format_aperture("f/4"), "f/4");
    }
}
