//! The `exifmark process` command for watermarking images.

mod batch;
mod setup;
pub mod types;

pub use types::{PositionArg, ReportFormat};

use clap::Args;
use exifmark_core::{Config, OutputFormat, WatermarkCompositor, WatermarkConfig};
use std::path::PathBuf;

use batch::process_batch;
use setup::setup_compositor;

/// Arguments for the `process` command.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Image files or directories to watermark
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory the watermarked copies are written to (created if missing)
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Leave the aperture out of the caption
    #[arg(long)]
    pub no_aperture: bool,

    /// Leave the ISO out of the caption
    #[arg(long)]
    pub no_iso: bool,

    /// Leave the shutter speed out of the caption
    #[arg(long)]
    pub no_shutter_speed: bool,

    /// Caption position (defaults to the config file, then bottom)
    #[arg(long, value_enum)]
    pub position: Option<PositionArg>,

    /// Appended to each file stem to name the output (defaults to "_watermarked")
    #[arg(long)]
    pub suffix: Option<String>,

    /// Write a per-file report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Report format (defaults to the config file, then json)
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

/// Manual Default impl for constructing ProcessArgs outside of clap.
impl Default for ProcessArgs {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: PathBuf::new(),
            no_aperture: false,
            no_iso: false,
            no_shutter_speed: false,
            position: None,
            suffix: None,
            report: None,
            format: None,
        }
    }
}

/// Processing context assembled by setup_compositor().
pub(crate) struct ProcessContext {
    pub compositor: WatermarkCompositor,
    pub watermark: WatermarkConfig,
    pub output_dir: PathBuf,
    pub suffix: String,
    pub report_format: OutputFormat,
    pub pretty: bool,
    pub config: Config,
}

/// Execute the process command.
///
/// Fails when any image could not be watermarked, so the exit status
/// reflects partial failures.
pub fn execute(args: ProcessArgs, config: Config) -> anyhow::Result<()> {
    let ctx = setup_compositor(&args, config)?;

    let discovery =
        exifmark_core::FileDiscovery::new(&ctx.config.processing).exclude(&ctx.output_dir);
    let files = discovery.discover_all(&args.inputs);
    if files.is_empty() {
        tracing::warn!("No supported image files found in {:?}", args.inputs);
        return Ok(());
    }
    tracing::info!("Found {} image(s) to watermark", files.len());

    let stats = process_batch(&ctx, &args, &files)?;
    if stats.failed > 0 {
        anyhow::bail!("{} of {} image(s) failed", stats.failed, stats.total());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        args: ProcessArgs,
    }

    fn parse(argv: &[&str]) -> ProcessArgs {
        let mut full = vec!["exifmark"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn process_args_default_flags_are_off() {
        let args = ProcessArgs::default();
        assert!(!args.no_aperture);
        assert!(!args.no_iso);
        assert!(!args.no_shutter_speed);
        assert!(args.position.is_none());
        assert!(args.suffix.is_none());
        assert!(args.report.is_none());
        assert!(args.format.is_none());
    }

    #[test]
    fn process_args_parse_multiple_inputs() {
        let args = parse(&["a.jpg", "photos/", "-o", "out"]);
        assert_eq!(args.inputs, vec![PathBuf::from("a.jpg"), PathBuf::from("photos/")]);
        assert_eq!(args.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn process_args_parse_overrides() {
        let args = parse(&[
            "a.jpg",
            "--output-dir",
            "out",
            "--no-iso",
            "--position",
            "top",
            "--suffix",
            "_exif",
            "--report",
            "report.jsonl",
            "--format",
            "jsonl",
        ]);
        assert!(args.no_iso);
        assert!(!args.no_aperture);
        assert_eq!(args.position, Some(PositionArg::Top));
        assert_eq!(args.suffix.as_deref(), Some("_exif"));
        assert_eq!(args.report, Some(PathBuf::from("report.jsonl")));
        assert_eq!(args.format, Some(ReportFormat::Jsonl));
    }

    #[test]
    fn process_args_reject_unknown_position() {
        let result = TestCli::try_parse_from(["exifmark", "a.jpg", "-o", "out", "--position", "middle"]);
        assert!(result.is_err());
    }

    #[test]
    fn execute_fails_when_an_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        image::RgbImage::new(32, 24).save(&good).unwrap();
        let missing = dir.path().join("missing.jpg");

        let args = ProcessArgs {
            inputs: vec![good, missing],
            output_dir: dir.path().join("out"),
            ..Default::default()
        };
        let err = execute(args, Config::default()).unwrap_err();
        assert!(err.to_string().contains("1 of 2"));
        assert!(dir.path().join("out").join("good_watermarked.jpg").exists());
    }
}
