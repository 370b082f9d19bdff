//! Core data types for the exifmark pipeline.
//!
//! `Metadata` is what the extractor reads, `WatermarkConfig` is what the
//! caller asks for, and the remaining types describe what happened to a file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Camera metadata read from an image's embedded EXIF.
///
/// Every field is the tag's human-readable description, or the empty string
/// when the tag (or its whole directory) is missing. An all-empty value is a
/// valid input to the compositor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Aperture (e.g., "f/2.8")
    pub aperture: String,

    /// ISO sensitivity, bare number (e.g., "400")
    pub iso: String,

    /// Exposure time (e.g., "1/250")
    pub shutter_speed: String,

    /// Camera manufacturer (e.g., "NIKON CORPORATION")
    pub manufacturer: String,

    /// Camera model (e.g., "NIKON Z 6")
    pub model: String,
}

impl Metadata {
    /// True when no field carries any data.
    pub fn is_empty(&self) -> bool {
        [
            &self.aperture,
            &self.iso,
            &self.shutter_speed,
            &self.manufacturer,
            &self.model,
        ]
        .iter()
        .all(|s| s.trim().is_empty())
    }
}

/// Vertical placement of the watermark band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Anchored one padding below the top edge
    Top,
    /// Anchored against the bottom edge
    #[default]
    Bottom,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Top => write!(f, "top"),
            Position::Bottom => write!(f, "bottom"),
        }
    }
}

/// Which metadata to show and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    pub show_aperture: bool,
    pub show_iso: bool,
    pub show_shutter_speed: bool,
    pub position: Position,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            show_aperture: true,
            show_iso: true,
            show_shutter_speed: true,
            position: Position::Bottom,
        }
    }
}

/// What `try_compose` produced for a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,

    /// The overlay text, empty when nothing was drawn
    pub watermark_text: String,

    /// Logo glyph string drawn left of the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// False when the text was blank and the image was passed through untouched
    pub overlay_drawn: bool,

    /// Camera settings read from the input before it was decoded
    pub metadata: Metadata,
}

/// Per-file result line of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Processing statistics for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProcessingStats {
    /// Images written successfully
    pub succeeded: usize,

    /// Images that failed
    pub failed: usize,

    /// Total processing time in seconds
    pub total_seconds: f64,
}

impl ProcessingStats {
    /// Fold one outcome into the counters.
    pub fn record(&mut self, outcome: &FileOutcome) {
        if outcome.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}
