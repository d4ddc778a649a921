//! Main decoder API
//!
//! This module drives the line classifier and payload accumulator across one
//! capture file and resolves the result into a timing sequence.
//!
//! Each file gets its own [`CaptureParser`]; nothing is shared between files.

use crate::formats::{classify, FieldName, Line, PayloadAccumulator};
use crate::types::{
    Capture, CaptureMetadata, CaptureRecord, DecoderError, Encoding, Protocol, Result,
    TimingSequence,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Line-by-line parser for one capture file
#[derive(Debug, Default)]
pub struct CaptureParser {
    protocol: Option<Protocol>,
    time_unit: Option<i64>,
    bit_count: Option<usize>,
    metadata: CaptureMetadata,
    payload: PayloadAccumulator,
    line_number: usize,
}

impl CaptureParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line of the file. Surrounding whitespace is ignored.
    pub fn feed_line(&mut self, line: &str) {
        self.line_number += 1;
        let line = line.trim();

        match classify(line) {
            Line::FieldHeader(field, value) => self.apply_header(field, value),
            Line::Continuation(tokens) => self.payload.continue_with(line, &tokens),
            Line::Blank => {}
        }
    }

    fn apply_header(&mut self, field: FieldName, value: &str) {
        log::trace!("line {}: {} = {:?}", self.line_number, field, value);

        match field {
            FieldName::Protocol => self.protocol = Some(Protocol::from_tag(value)),
            FieldName::Bit => self.bit_count = self.parse_number(field, value),
            FieldName::Te => self.time_unit = self.parse_number(field, value),
            FieldName::RawData => self.payload.open_raw_data(value),
            FieldName::DataRaw => self.payload.open_data_raw(value),
            FieldName::Filetype => self.metadata.filetype = Some(value.to_string()),
            FieldName::Version => self.metadata.version = Some(value.to_string()),
            FieldName::Frequency => self.metadata.frequency = self.parse_number(field, value),
            FieldName::Preset => self.metadata.preset = Some(value.to_string()),
            FieldName::BitRaw => self.metadata.bit_raw = self.parse_number(field, value),
        }
    }

    /// Parse a numeric header value. A bad value leaves the field unset.
    fn parse_number<T: FromStr>(&self, field: FieldName, value: &str) -> Option<T> {
        match value.parse() {
            Ok(number) => Some(number),
            Err(_) => {
                log::warn!(
                    "line {}: ignoring unparseable {} value {:?}",
                    self.line_number,
                    field,
                    value
                );
                None
            }
        }
    }

    /// Finish parsing and hand back the record
    pub fn finish(self) -> CaptureRecord {
        let (raw_timings, hex_payload) = self.payload.into_parts();
        CaptureRecord {
            protocol: self.protocol,
            time_unit: self.time_unit,
            bit_count: self.bit_count,
            raw_timings,
            hex_payload,
            metadata: self.metadata,
        }
    }
}

/// A fully decoded capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCapture {
    pub protocol: Option<Protocol>,
    pub metadata: CaptureMetadata,
    pub encoding: Encoding,
    pub timings: TimingSequence,
}

impl DecodedCapture {
    /// Resolve a finished record into its timing sequence
    pub fn from_record(record: CaptureRecord) -> Result<Self> {
        let protocol = record.protocol.clone();
        let metadata = record.metadata.clone();
        let capture: Capture = record.into_capture();
        let encoding = capture.encoding();
        let timings = capture.into_timings()?;

        Ok(Self {
            protocol,
            metadata,
            encoding,
            timings,
        })
    }
}

/// Parse capture text that is already in memory
pub fn parse_capture<I, S>(lines: I) -> CaptureRecord
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = CaptureParser::new();
    for line in lines {
        parser.feed_line(line.as_ref());
    }
    parser.finish()
}

/// Read and parse a capture file
///
/// # Errors
/// * `NotFound` if `path` does not exist
/// * `IoError` for any other read failure, including non-UTF-8 content
pub fn read_capture(path: &Path) -> Result<CaptureRecord> {
    log::info!("Reading capture file: {:?}", path);

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DecoderError::NotFound(path.to_path_buf()),
        _ => DecoderError::IoError(e),
    })?;

    let mut parser = CaptureParser::new();
    for line in BufReader::new(file).lines() {
        parser.feed_line(&line?);
    }

    Ok(parser.finish())
}

/// Decode a capture file, keeping its headers alongside the timings
pub fn decode_capture_file(path: &Path) -> Result<DecodedCapture> {
    let decoded = DecodedCapture::from_record(read_capture(path)?)?;
    log::info!(
        "Decoded {:?}: {} {} timing values",
        path,
        decoded.timings.len(),
        decoded.encoding
    );
    Ok(decoded)
}

/// Decode a capture file into its timing sequence
///
/// # Example
/// ```no_run
/// use std::path::Path;
///
/// let timings = subghz_decoder::decode_file(Path::new("on.sub")).unwrap();
/// println!("{} timing values", timings.len());
/// ```
pub fn decode_file(path: &Path) -> Result<TimingSequence> {
    decode_capture_file(path).map(|decoded| decoded.timings)
}

/// Decode capture text that is already in memory
pub fn decode_str(text: &str) -> Result<DecodedCapture> {
    DecodedCapture::from_record(parse_capture(text.lines()))
}
