//! Error types for the exifmark pipeline.
//!
//! Errors are organized by stage so a failed file can be reported with its
//! path and the step that broke. Metadata extraction has no error variant:
//! it degrades to empty fields instead of failing.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for exifmark operations.
#[derive(Error, Debug)]
pub enum ExifmarkError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// The configured overlay font could not be loaded
    #[error("Cannot load font {path}: {message}")]
    FontError { path: PathBuf, message: String },
}

/// Per-file processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// JPEG encoding or writing the output file failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Unsupported image format
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Convenience type alias for exifmark results.
pub type Result<T> = std::result::Result<T, ExifmarkError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_mentions_path() {
        let err = PipelineError::Decode {
            path: PathBuf::from("/photos/broken.jpg"),
            message: "unexpected EOF".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/photos/broken.jpg"));
        assert!(msg.contains("unexpected EOF"));
    }

    #[test]
    fn test_pipeline_error_converts_to_top_level() {
        let err: ExifmarkError = PipelineError::FileNotFound(PathBuf::from("a.jpg")).into();
        assert!(err.to_string().starts_with("Pipeline error: File not found"));
    }
}
