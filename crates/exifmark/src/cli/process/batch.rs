//! Batch processing: one compositor call per file with progress and a summary.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use exifmark_core::{FileOutcome, OutputWriter, ProcessingStats};

use super::{ProcessArgs, ProcessContext};

/// Watermark every file, write the optional report, and print a summary.
pub fn process_batch(
    ctx: &ProcessContext,
    args: &ProcessArgs,
    files: &[PathBuf],
) -> anyhow::Result<ProcessingStats> {
    let progress = create_progress_bar(files.len() as u64);
    let start_time = std::time::Instant::now();

    let mut stats = ProcessingStats::default();
    let mut outcomes = Vec::with_capacity(files.len());
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for input in files {
        let output = output_path_for(input, &ctx.output_dir, &ctx.suffix);
        if !claimed.insert(output.clone()) {
            tracing::warn!(
                "{:?} maps to {:?}, already written in this run; it will be overwritten",
                input,
                output
            );
        }

        let outcome = if same_file(input, &output) {
            tracing::error!("Skipped: {:?} - output path is the input itself", input);
            FileOutcome {
                input: input.clone(),
                output,
                success: false,
                error: Some(
                    "output path is the input itself; change --output-dir or --suffix".to_string(),
                ),
                metadata: None,
            }
        } else {
            compose_one(ctx, args, input, output)
        };
        stats.record(&outcome);
        outcomes.push(outcome);

        progress.inc(1);
        let elapsed = start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            progress.set_message(format!("{:.1} img/sec", stats.total() as f64 / elapsed));
        }
    }

    stats.total_seconds = start_time.elapsed().as_secs_f64();
    progress.finish_and_clear();

    if let Some(report_path) = &args.report {
        write_report(ctx, report_path, &outcomes)?;
        tracing::info!("Report written to {:?}", report_path);
    }

    print_summary(&stats, &ctx.output_dir);
    Ok(stats)
}

fn compose_one(
    ctx: &ProcessContext,
    args: &ProcessArgs,
    input: &Path,
    output: PathBuf,
) -> FileOutcome {
    match ctx.compositor.try_compose(input, &output, &ctx.watermark) {
        Ok(report) => {
            tracing::debug!("Wrote {:?} ({:?})", report.output, report.watermark_text);
            FileOutcome {
                input: input.to_path_buf(),
                output,
                success: true,
                error: None,
                metadata: args.report.as_ref().map(|_| report.metadata),
            }
        }
        Err(e) => {
            tracing::error!("Failed: {:?} - {}", input, e);
            FileOutcome {
                input: input.to_path_buf(),
                output,
                success: false,
                error: Some(e.to_string()),
                metadata: None,
            }
        }
    }
}

/// Whether `output` names the same file as `input`.
///
/// The output usually does not exist yet, so its directory is resolved instead.
fn same_file(input: &Path, output: &Path) -> bool {
    let Ok(input) = input.canonicalize() else {
        return false;
    };
    let resolved = match (output.parent(), output.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            parent.canonicalize().map(|dir| dir.join(name))
        }
        _ => output.canonicalize(),
    };
    resolved.map(|output| output == input).unwrap_or(false)
}

/// `{dir}/{stem}{suffix}.jpg`.
pub fn output_path_for(input: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    output_dir.join(format!("{stem}{suffix}.jpg"))
}

fn write_report(
    ctx: &ProcessContext,
    path: &Path,
    outcomes: &[FileOutcome],
) -> anyhow::Result<()> {
    let file = File::create(path)
        .map_err(|e| anyhow::anyhow!("Cannot create report {:?}: {}", path, e))?;
    let mut writer = OutputWriter::new(BufWriter::new(file), ctx.report_format, ctx.pretty);
    writer.write_all(outcomes)?;
    writer.flush()?;
    Ok(())
}

/// Create a progress bar for batch processing.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    match ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        Ok(style) => pb.set_style(style.progress_chars("##-")),
        Err(e) => tracing::debug!("Falling back to default progress style: {e}"),
    }
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after batch processing.
fn print_summary(stats: &ProcessingStats, output_dir: &Path) {
    let rate = if stats.total_seconds > 0.0 {
        stats.succeeded as f64 / stats.total_seconds
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Succeeded:    {:>8}", stats.succeeded);
    if stats.failed > 0 {
        eprintln!("    Failed:       {:>8}", stats.failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", stats.total());
    eprintln!("    Duration:     {:>7.1}s", stats.total_seconds);
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
    eprintln!("    Output: {}", output_dir.display());
}
