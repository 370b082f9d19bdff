//! Fixture builders shared by unit tests.

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Tag value in the handful of types the fixtures need.
#[derive(Debug, Clone, Copy)]
pub enum ExifValue {
    Ascii(&'static str),
    Short(u16),
    Rational(u32, u32),
}

impl ExifValue {
    fn into_value(self) -> Value {
        match self {
            ExifValue::Ascii(s) => Value::Ascii(vec![s.as_bytes().to_vec()]),
            ExifValue::Short(n) => Value::Short(vec![n]),
            ExifValue::Rational(num, denom) => Value::Rational(vec![Rational { num, denom }]),
        }
    }
}

/// Mid-gray test image.
pub fn gray_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([128, 128, 128]))
}

/// Write a mid-gray PNG without any metadata.
pub fn write_png(path: &Path, width: u32, height: u32) {
    gray_image(width, height)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

/// Serialize primary-image tags to a little-endian TIFF block.
///
/// Tags are split into IFD0 and the Exif sub-IFD by their context.
pub fn exif_tiff(tags: &[(Tag, ExifValue)]) -> Vec<u8> {
    let fields: Vec<Field> = tags
        .iter()
        .map(|(tag, value)| Field {
            tag: *tag,
            ifd_num: In::PRIMARY,
            value: value.into_value(),
        })
        .collect();

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, true).unwrap();
    buf.into_inner()
}

/// A gray baseline JPEG carrying an APP1 Exif segment.
///
/// `ifd0` and `exif_ifd` are only separated for readability at call sites.
pub fn exif_jpeg(
    width: u32,
    height: u32,
    ifd0: &[(Tag, ExifValue)],
    exif_ifd: &[(Tag, ExifValue)],
) -> Vec<u8> {
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, 95)
        .encode_image(&gray_image(width, height))
        .unwrap();

    let tags: Vec<(Tag, ExifValue)> = ifd0.iter().chain(exif_ifd).copied().collect();
    if tags.is_empty() {
        return jpeg;
    }

    let tiff = exif_tiff(&tags);
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);
    let length = u16::try_from(payload.len() + 2).unwrap();

    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]); // SOI
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}
