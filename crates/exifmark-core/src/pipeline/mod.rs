//! Per-file processing stages.
//!
//! - **discovery**: expand input paths into image files
//! - **metadata**: read camera settings from EXIF
//! - **validate**: cheap pre-decode checks
//! - **decode**: load pixels with format sniffing
//! - **encode**: write the rendered image as JPEG
//! - **processor**: the compositor tying the stages together

pub mod decode;
pub mod discovery;
pub mod encode;
pub mod metadata;
pub mod processor;
pub mod validate;

pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::FileDiscovery;
pub use encode::{JpegWriter, JPEG_QUALITY};
pub use metadata::MetadataExtractor;
pub use processor::WatermarkCompositor;
pub use validate::Validator;
