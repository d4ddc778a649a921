//! Capture file inspector
//!
//! Decodes one or more `.sub` files and prints their headers and a summary of
//! the timing sequence.
//!
//! Usage:
//!   inspect_sub <file.sub> [more.sub ...] [--verbose]
//!
//! Example:
//!   cargo run --example inspect_sub -- on.sub off.sub --verbose

use std::env;
use std::path::PathBuf;
use subghz_decoder::{decode_capture_file, DecodedCapture, DecoderError};

struct TimingStats {
    count: usize,
    high_us: i64,
    low_us: i64,
    shortest: Option<i64>,
    longest: Option<i64>,
}

impl TimingStats {
    fn from_timings(timings: &[i64]) -> Self {
        let magnitudes = timings.iter().map(|t| t.abs());
        Self {
            count: timings.len(),
            high_us: timings.iter().filter(|t| **t > 0).sum(),
            low_us: -timings.iter().filter(|t| **t < 0).sum::<i64>(),
            shortest: magnitudes.clone().min(),
            longest: magnitudes.max(),
        }
    }

    fn print_summary(&self) {
        println!("  Timing values: {}", self.count);
        println!("  Total high:    {} us", self.high_us);
        println!("  Total low:     {} us", self.low_us);
        if let (Some(shortest), Some(longest)) = (self.shortest, self.longest) {
            println!("  Pulse range:   {}..{} us", shortest, longest);
        }
    }
}

fn print_capture(decoded: &DecodedCapture, verbose: bool) {
    let meta = &decoded.metadata;
    println!(
        "  Filetype:  {}",
        meta.filetype.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Protocol:  {}",
        decoded
            .protocol
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );
    println!("  Encoding:  {}", decoded.encoding);
    if let Some(frequency) = meta.frequency {
        println!("  Frequency: {:.3} MHz", frequency as f64 / 1_000_000.0);
    }
    if let Some(preset) = &meta.preset {
        println!("  Preset:    {}", preset);
    }

    TimingStats::from_timings(&decoded.timings).print_summary();

    if verbose {
        for chunk in decoded.timings.chunks(10) {
            let line: Vec<String> = chunk.iter().map(|t| t.to_string()).collect();
            println!("    {}", line.join(" "));
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let files: Vec<PathBuf> = args
        .iter()
        .filter(|a| !a.starts_with('-'))
        .map(PathBuf::from)
        .collect();

    if files.is_empty() {
        eprintln!("Usage: inspect_sub <file.sub> [more.sub ...] [--verbose]");
        std::process::exit(1);
    }

    for path in &files {
        println!("\n=== {} ===", path.display());
        match decode_capture_file(path) {
            Ok(decoded) => print_capture(&decoded, verbose),
            Err(DecoderError::NotFound(_)) => println!("  File not found"),
            Err(e) => println!("  Error: {}", e),
        }
    }
}
