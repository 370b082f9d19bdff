//! Subcommand implementations.

pub mod config;
pub mod exif;
pub mod process;
