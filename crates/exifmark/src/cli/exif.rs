//! The `exifmark exif` command: show the camera settings a watermark would use.

use clap::Args;
use exifmark_core::{Config, Metadata, MetadataExtractor, OutputWriter};
use serde::Serialize;
use std::io::BufWriter;
use std::path::PathBuf;

use super::process::types::ReportFormat;

/// Arguments for the `exif` command.
#[derive(Args, Debug)]
pub struct ExifArgs {
    /// Image files or directories to inspect
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
}

/// One line of `exif` output.
#[derive(Debug, Serialize)]
struct ExifRecord {
    path: PathBuf,
    #[serde(flatten)]
    metadata: Metadata,
}

/// Execute the exif command.
pub fn execute(args: ExifArgs, config: &Config) -> anyhow::Result<()> {
    let discovery = exifmark_core::FileDiscovery::new(&config.processing);
    let files = discovery.discover_all(&args.inputs);
    if files.is_empty() {
        tracing::warn!("No supported image files found in {:?}", args.inputs);
        return Ok(());
    }

    let records: Vec<ExifRecord> = files
        .into_iter()
        .map(|path| {
            let metadata = MetadataExtractor::extract(&path);
            if metadata.is_empty() {
                tracing::info!("No camera settings found in {:?}", path);
            }
            ExifRecord { path, metadata }
        })
        .collect();

    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(BufWriter::new(stdout.lock()), args.format.into(), true);
    writer.write_all(&records)?;
    writer.flush()?;
    Ok(())
}
