//! exifmark CLI - stamp camera settings from EXIF onto photos.
//!
//! Reads aperture, ISO and shutter speed from each photo and writes a copy
//! with a translucent caption showing them, plus a manufacturer logo.
//!
//! # Usage
//!
//! ```bash
//! # Watermark a folder of photos
//! exifmark process ./photos/ --output-dir ./stamped
//!
//! # Only aperture and shutter speed, at the top
//! exifmark process DSC_0001.jpg -o ./stamped --no-iso --position top
//!
//! # Inspect what would be shown
//! exifmark exif DSC_0001.jpg
//!
//! # View configuration
//! exifmark config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// exifmark - stamp camera settings from EXIF onto your photos.
#[derive(Parser, Debug)]
#[command(name = "exifmark")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Watermark images with their camera settings
    Process(cli::process::ProcessArgs),

    /// Print the camera settings read from images
    Exif(cli::exif::ExifArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go straight to stderr.
    let config = match exifmark_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `exifmark config path`."
            );
            exifmark_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("exifmark v{}", exifmark_core::VERSION);

    match cli.command {
        Commands::Process(args) => cli::process::execute(args, config),
        Commands::Exif(args) => cli::exif::execute(args, &config),
        Commands::Config(args) => cli::config::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["exifmark", "exif", "a.jpg", "-v", "--json-logs"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.json_logs);
        assert!(matches!(cli.command, Commands::Exif(_)));
    }

    #[test]
    fn process_requires_output_dir() {
        assert!(Cli::try_parse_from(["exifmark", "process", "a.jpg"]).is_err());
        assert!(Cli::try_parse_from(["exifmark", "process", "a.jpg", "-o", "out"]).is_ok());
    }
}
