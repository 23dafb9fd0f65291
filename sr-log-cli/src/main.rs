//! SR Log Reader CLI Application
//!
//! Command-line front end for the sr-log-decoder library. Decodes one or more
//! sigrok `.sr` captures and prints their channel table, sample count and the
//! first levels of the selected channels.

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use sr_log_decoder::Decoder;
use std::path::PathBuf;

mod config;
mod report;

use config::{AppConfig, OutputFormat};
use report::CaptureReport;

/// SR Log Reader - Decode sigrok logic-analyzer captures
#[derive(Parser, Debug)]
#[command(name = "sr-log-cli")]
#[command(about = "Decode sigrok logic-analyzer captures (.sr)", long_about = None)]
#[command(version)]
struct Args {
    /// Capture file(s) to decode
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Channel to print levels for (can be repeated, default: all)
    #[arg(long, value_name = "NAME")]
    channel: Vec<String>,

    /// Number of samples to print per channel
    #[arg(long, value_name = "COUNT")]
    max_samples: Option<u64>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("SR Log Reader CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", sr_log_decoder::VERSION);

    // Load config file and apply command-line overrides
    let config = merge_config(&args)?;

    // No input - show quick start
    if config.input.files.is_empty() {
        println!("SR Log Reader - No input specified");
        println!("\nQuick Start:");
        println!("  sr-log-cli capture.sr");
        println!("  sr-log-cli capture.sr --channel CLK --channel DATA --max-samples 64");
        println!("\nUse --help for more options");
        return Ok(());
    }

    // Decode all captures
    let reports = decode_all(&config)?;

    // Print reports
    match config.output.format {
        OutputFormat::Txt => {
            for report in &reports {
                print!("{}", report.to_text());
            }
        }
        OutputFormat::Json => println!("{}", report::to_json(&reports)?),
    }

    Ok(())
}

/// Combine the optional config file with command-line overrides
fn merge_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    // Command-line values win over the config file

    if !args.files.is_empty() {
        config.input.files = args.files.clone();
    }
    if !args.channel.is_empty() {
        config.output.channels = args.channel.clone();
    }
    if let Some(max) = args.max_samples {
        config.output.max_samples = max;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    Ok(config)
}

/// Decode every input file in parallel, keeping input order
fn decode_all(config: &AppConfig) -> Result<Vec<CaptureReport>> {
    let decoder = Decoder::with_config(config.decoder.clone());

    config
        .input
        .files
        .par_iter()
        .map(|path| -> Result<CaptureReport> {
            // Decode and summarize one capture
            let capture = decoder
                .open(path)
                .with_context(|| format!("Failed to decode {:?}", path))?;
            let report = CaptureReport::build(
                path,
                &capture,
                &config.output.channels,
                config.output.max_samples,
            )
            .with_context(|| format!("Failed to report on {:?}", path))?;
            capture.close();
            Ok(report)
        })
        .collect()
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
