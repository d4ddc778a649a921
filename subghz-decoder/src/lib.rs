//! Sub-GHz Capture Decoder Library
//!
//! A stateless library for turning sub-gigahertz radio capture files (`.sub`)
//! into flat sequences of signed microsecond durations that a microcontroller
//! transmitter can replay.
//!
//! # Architecture
//!
//! Two payload encodings are supported:
//! - `RAW_Data`: literal signed durations, passed through as written
//! - `Data_RAW` (protocol `BinRAW`): packed bits expanded by run-length decoding
//!   with the declared time element (`TE`)
//!
//! The library does NOT:
//! - Discover input files
//! - Write output files
//! - Print progress
//!
//! All of that lives in the application layer (subghz-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use subghz_decoder::{decode_file, ArrayRenderer, RenderConfig};
//! use std::path::Path;
//!
//! let timings = decode_file(Path::new("on.sub")).unwrap();
//!
//! let renderer = ArrayRenderer::new(RenderConfig::new().with_values_per_line(16)).unwrap();
//! let block = renderer.render(&timings, "signalOn").unwrap();
//! println!("{}", block);
//! ```

// Public modules
pub mod binraw;
pub mod config;
pub mod decoder;
pub mod formats;
pub mod render;
pub mod types;

// Re-export main types for convenience
pub use config::{OverflowPolicy, RenderConfig, DEFAULT_VALUES_PER_LINE};
pub use decoder::{
    decode_capture_file, decode_file, decode_str, parse_capture, read_capture, CaptureParser,
    DecodedCapture,
};
pub use render::{
    render, render_failure, render_header, render_missing, ArrayRenderer, ElementType,
};
pub use types::{
    BinRawParams, Capture, CaptureMetadata, CaptureRecord, DecoderError, Encoding, Protocol,
    Result, Timing, TimingSequence,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
