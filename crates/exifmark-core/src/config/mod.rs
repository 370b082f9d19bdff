//! Configuration management for exifmark.
//!
//! Configuration is loaded from the platform config directory with defaults
//! for every field, so a missing or partial file is fine.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::types::WatermarkConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for exifmark.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default watermark content and placement
    pub watermark: WatermarkConfig,

    /// Overlay rendering settings
    pub render: RenderConfig,

    /// Input discovery and output naming
    pub processing: ProcessingConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Batch report settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.exifmark.exifmark/config.toml
    /// - Linux: ~/.config/exifmark/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\exifmark\config\config.toml
    ///
    /// Falls back to ~/.exifmark/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "exifmark", "exifmark")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".exifmark").join("config.toml")
            })
    }

    /// Get the resolved font override (with ~ expansion), if one is set.
    pub fn font_path(&self) -> Option<PathBuf> {
        self.render.font_path.as_ref().map(|path| {
            let path_str = path.to_string_lossy();
            let expanded = shellexpand::tilde(&path_str);
            PathBuf::from(expanded.into_owned())
        })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
