//! exifmark core - stamp camera settings onto photos.
//!
//! Reads aperture, ISO, shutter speed and camera make from a photo's EXIF
//! data and composites them as a translucent caption, writing the result as
//! a maximum-quality JPEG.
//!
//! ```text
//! Image → Extract Metadata → Decode → Build Text → Layout → Draw → JPEG q100
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use exifmark_core::{MetadataExtractor, WatermarkCompositor, WatermarkConfig};
//! use std::path::Path;
//!
//! let meta = MetadataExtractor::extract(Path::new("DSC_0001.jpg"));
//! println!("{} {}", meta.manufacturer, meta.aperture);
//!
//! let compositor = WatermarkCompositor::with_defaults()?;
//! let ok = compositor.compose(
//!     Path::new("DSC_0001.jpg"),
//!     Path::new("DSC_0001_watermarked.jpg"),
//!     &WatermarkConfig::default(),
//! );
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod types;
pub mod watermark;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use error::{ConfigError, ExifmarkError, PipelineError, PipelineResult, Result};
pub use output::{OutputFormat, OutputWriter};
pub use pipeline::{FileDiscovery, MetadataExtractor, WatermarkCompositor};
pub use types::{
    ComposeReport, FileOutcome, Metadata, Position, ProcessingStats, WatermarkConfig,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
