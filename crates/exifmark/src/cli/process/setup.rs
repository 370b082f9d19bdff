//! Compositor setup: config overrides, output directory, report format.

use exifmark_core::{Config, OutputFormat, WatermarkCompositor, WatermarkConfig};
use std::path::PathBuf;

use super::{ProcessArgs, ProcessContext};

/// Resolve flags against the config and build everything needed for processing.
pub fn setup_compositor(args: &ProcessArgs, config: Config) -> anyhow::Result<ProcessContext> {
    let watermark = watermark_config(args, &config);

    let suffix = args
        .suffix
        .clone()
        .unwrap_or_else(|| config.processing.output_suffix.clone());
    if suffix.contains(&['/', '\\'][..]) {
        anyhow::bail!("--suffix must not contain path separators: {:?}", suffix);
    }

    let output_dir = expand_path(&args.output_dir);
    std::fs::create_dir_all(&output_dir).map_err(|e| {
        anyhow::anyhow!("Cannot create output directory {:?}: {}", output_dir, e)
    })?;

    let report_format = match args.format {
        Some(format) => format.into(),
        None => OutputFormat::parse(&config.output.format).unwrap_or(OutputFormat::Json),
    };

    let compositor = WatermarkCompositor::new(&config)?;

    tracing::debug!(
        "Caption: aperture={} iso={} shutter={} position={}",
        watermark.show_aperture,
        watermark.show_iso,
        watermark.show_shutter_speed,
        watermark.position
    );

    Ok(ProcessContext {
        compositor,
        watermark,
        output_dir,
        suffix,
        report_format,
        pretty: config.output.pretty,
        config,
    })
}

/// `[watermark]` defaults with the command-line flags applied on top.
fn watermark_config(args: &ProcessArgs, config: &Config) -> WatermarkConfig {
    let mut watermark = config.watermark.clone();
    if args.no_aperture {
        watermark.show_aperture = false;
    }
    if args.no_iso {
        watermark.show_iso = false;
    }
    if args.no_shutter_speed {
        watermark.show_shutter_speed = false;
    }
    if let Some(position) = args.position {
        watermark.position = position.into();
    }
    watermark
}

fn expand_path(path: &std::path::Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}
