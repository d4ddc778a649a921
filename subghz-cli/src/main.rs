//! Sub-GHz Capture Converter CLI
//!
//! Command-line front end for the subghz-decoder library. It adds:
//! - Input discovery (files, `PATH=NAME` pairs, directories of `.sub` files)
//! - Array naming
//! - Parallel batch decoding
//! - Header / JSON output and console summary

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use subghz_decoder::{decode_capture_file, ArrayRenderer, DecoderError, OverflowPolicy};

mod config;
mod inputs;
mod naming;
mod report;

use config::{AppConfig, InputConfig, OutputFormat};
use inputs::Job;
use report::FileOutcome;

/// Sub-GHz converter - turn capture files into C timing arrays
#[derive(Parser, Debug)]
#[command(name = "subghz-cli")]
#[command(about = "Convert Sub-GHz capture files (.sub) into C timing arrays", long_about = None)]
#[command(version)]
struct Args {
    /// Capture files or directories; use PATH=NAME to pick the array name
    /// (an existing path containing '=' is taken as a plain path)
    #[arg(value_name = "INPUT")]
    inputs: Vec<String>,

    /// Output file, or "-" for stdout (default: signal_arrays.h)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Array entries per line
    #[arg(long, value_name = "COUNT")]
    values_per_line: Option<usize>,

    /// How to handle durations that do not fit in int16_t
    #[arg(long, value_enum)]
    overflow: Option<OverflowArg>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not echo the generated arrays to the console
    #[arg(long)]
    no_print: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OverflowArg {
    Reject,
    Saturate,
    Widen,
}

impl From<OverflowArg> for OverflowPolicy {
    fn from(arg: OverflowArg) -> Self {
        match arg {
            OverflowArg::Reject => OverflowPolicy::Reject,
            OverflowArg::Saturate => OverflowPolicy::Saturate,
            OverflowArg::Widen => OverflowPolicy::Widen,
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("SubGHz converter CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", subghz_decoder::VERSION);

    let settings = resolve_settings(&args)?;
    let renderer = ArrayRenderer::new(settings.render.clone())?;
    // No console chatter when stdout carries the output
    let console = !args.quiet && settings.output.path != Path::new("-");

    if console {
        println!("Flipper SubGhz RAW to ESP32 Converter");
        println!("{}", "=".repeat(50));
    }

    let jobs = inputs::expand_inputs(&settings.inputs);
    if jobs.is_empty() {
        anyhow::bail!("No capture files found in the given inputs");
    }

    let outcomes = decode_all(jobs);
    if console {
        print_outcomes(&outcomes);
    }

    match settings.output.format {
        OutputFormat::Header => {
            let text = report::header_report(&outcomes, &renderer);
            write_output(&settings.output.path, &text)?;
            if console {
                print_instructions(&settings.output.path);
                if settings.output.print {
                    print_arrays(&outcomes, &renderer);
                }
            }
        }
        OutputFormat::Json => {
            let text = report::json_text(&outcomes)?;
            write_output(&settings.output.path, &text)?;
            if console {
                println!("\n✓ Report written to: {}", settings.output.path.display());
            }
        }
    }

    Ok(())
}

/// Merge the config file (if any) with command-line overrides
fn resolve_settings(args: &Args) -> Result<AppConfig> {
    let mut settings = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if !args.inputs.is_empty() {
        settings.inputs = args.inputs.iter().map(|a| InputConfig::from_arg(a)).collect();
    }
    if settings.inputs.is_empty() {
        log::debug!("No inputs given, using off.sub and on.sub");
        settings.inputs = config::default_inputs();
    }
    if let Some(output) = &args.output {
        settings.output.path = output.clone();
    }
    if let Some(format) = args.format {
        settings.output.format = format;
    }
    if let Some(values_per_line) = args.values_per_line {
        settings.render.values_per_line = values_per_line;
    }
    if let Some(overflow) = args.overflow {
        settings.render.overflow = overflow.into();
    }
    if args.no_print {
        settings.output.print = false;
    }

    log::debug!("Effective settings: {:?}", settings);
    Ok(settings)
}

/// Decode every job on the rayon pool; results keep input order
fn decode_all(jobs: Vec<Job>) -> Vec<FileOutcome> {
    jobs.into_par_iter()
        .map(|job| {
            let result = decode_capture_file(&job.path);
            if let Err(e) = &result {
                log::warn!("Failed to decode {:?}: {}", job.path, e);
            }
            FileOutcome { job, result }
        })
        .collect()
}

fn print_outcomes(outcomes: &[FileOutcome]) {
    for outcome in outcomes {
        let file_name = outcome.job.display_name();
        println!("\nProcessing '{}'...", file_name);
        match &outcome.result {
            Ok(decoded) => println!("Found {} timing values", decoded.timings.len()),
            Err(DecoderError::NotFound(_)) => println!("Error: '{}' file not found!", file_name),
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if path == Path::new("-") {
        print!("{}", text);
        return Ok(());
    }
    fs::write(path, text).with_context(|| format!("Failed to write output file: {:?}", path))?;
    log::info!("Wrote {} bytes to {:?}", text.len(), path);
    Ok(())
}

fn print_instructions(output: &Path) {
    println!("\n✓ Conversion complete!");
    println!("✓ Output written to: {}", output.display());
    println!("\nInstructions:");
    println!("1. Open '{}'", output.display());
    println!("2. Copy the array definitions");
    println!("3. Replace the existing signal arrays in your ESP32 sketch");
    println!("4. Upload to your ESP32");
}

fn print_arrays(outcomes: &[FileOutcome], renderer: &ArrayRenderer) {
    println!("\n{}", "=".repeat(50));
    println!("COPY THE FOLLOWING INTO YOUR SKETCH:");
    println!("{}", "=".repeat(50));
    for block in report::header_blocks(outcomes, renderer) {
        println!("{}", block);
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use subghz_decoder::RenderConfig;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_resolve_settings_defaults() {
        let args = Args::try_parse_from(["subghz-cli"]).unwrap();
        let settings = resolve_settings(&args).unwrap();

        assert_eq!(
            settings.inputs,
            vec![
                InputConfig::new("off.sub", Some("signalOff")),
                InputConfig::new("on.sub", Some("signalOn")),
            ]
        );
        assert_eq!(settings.output.path, PathBuf::from("signal_arrays.h"));
        assert_eq!(settings.output.format, OutputFormat::Header);
        assert!(settings.output.print);
        assert_eq!(settings.render, RenderConfig::default());
    }

    #[test]
    fn test_resolve_settings_keeps_config_values() {
        let file = write_config(
            "[[inputs]]\npath = \"a.sub\"\nname = \"signalA\"\n\n\
             [render]\nvalues_per_line = 8\noverflow = \"saturate\"",
        );
        let path = file.path().to_string_lossy().into_owned();
        let args = Args::try_parse_from(["subghz-cli", "-c", path.as_str()]).unwrap();
        let settings = resolve_settings(&args).unwrap();

        assert_eq!(settings.inputs, vec![InputConfig::new("a.sub", Some("signalA"))]);
        assert_eq!(settings.render.values_per_line, 8);
        assert_eq!(settings.render.overflow, OverflowPolicy::Saturate);
        assert!(settings.output.print);
    }

    #[test]
    fn test_resolve_settings_flags_override_config() {
        let file = write_config(
            "[[inputs]]\npath = \"a.sub\"\n\n\
             [render]\nvalues_per_line = 8\noverflow = \"saturate\"",
        );
        let path = file.path().to_string_lossy().into_owned();
        let args = Args::try_parse_from([
            "subghz-cli",
            "-c",
            path.as_str(),
            "b.sub=signalB",
            "--values-per-line",
            "4",
            "--overflow",
            "widen",
            "--format",
            "json",
            "-o",
            "-",
            "--no-print",
        ])
        .unwrap();
        let settings = resolve_settings(&args).unwrap();

        assert_eq!(settings.inputs, vec![InputConfig::new("b.sub", Some("signalB"))]);
        assert_eq!(settings.render.values_per_line, 4);
        assert_eq!(settings.render.overflow, OverflowPolicy::Widen);
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(settings.output.path, PathBuf::from("-"));
        assert!(!settings.output.print);
    }

    #[test]
    fn test_resolve_settings_bad_config_fails() {
        let file = write_config("[render]\nvalues_per_line = 0");
        let path = file.path().to_string_lossy().into_owned();
        let args = Args::try_parse_from(["subghz-cli", "--config", path.as_str()]).unwrap();
        assert!(resolve_settings(&args).is_err());
    }
}
