//! Core types for the Sub-GHz capture decoder library
//!
//! This module defines the values the decoder produces when processing capture
//! files. Every capture is parsed into a fresh [`CaptureRecord`], which is then
//! resolved into a [`Capture`] (RAW or BinRAW) and finally into a timing sequence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A single signed duration in microseconds (positive = high, negative = low)
pub type Timing = i64;

/// Ordered signed durations, ready to be replayed by a transmitter
pub type TimingSequence = Vec<Timing>;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Errors that can occur during decoding and rendering
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Capture file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Protocol tag declared by the `Protocol:` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Protocol {
    /// Literal pulse durations (`RAW_Data`)
    Raw,
    /// Bit-packed payload (`Data_RAW`), decoded by run-length expansion
    BinRaw,
    /// Any other decoder name (e.g. `Princeton`); treated like RAW
    Other(String),
}

impl Protocol {
    /// Interpret a header value. Matching is exact, as written by the capture device.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "RAW" => Protocol::Raw,
            "BinRAW" => Protocol::BinRaw,
            other => Protocol::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Protocol::Raw => "RAW",
            Protocol::BinRaw => "BinRAW",
            Protocol::Other(name) => name,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Protocol {
    fn from(tag: String) -> Self {
        Protocol::from_tag(&tag)
    }
}

impl From<Protocol> for String {
    fn from(protocol: Protocol) -> Self {
        protocol.as_str().to_string()
    }
}

/// Informational headers. None of these influence decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureMetadata {
    /// `Filetype:` header, e.g. "Flipper SubGhz RAW File"
    pub filetype: Option<String>,
    /// `Version:` header, kept verbatim
    pub version: Option<String>,
    /// `Frequency:` header in Hz
    pub frequency: Option<u64>,
    /// `Preset:` header (modulation preset name)
    pub preset: Option<String>,
    /// `Bit_RAW:` header
    pub bit_raw: Option<u64>,
}

/// Full parsed state of one capture file
///
/// Built line by line by [`crate::CaptureParser`] and read once when the file
/// has been consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureRecord {
    pub protocol: Option<Protocol>,
    /// Microseconds per bit (`TE:`)
    pub time_unit: Option<i64>,
    /// Truncation limit for the BinRAW bit string (`Bit:`)
    pub bit_count: Option<usize>,
    /// RAW path payload
    pub raw_timings: TimingSequence,
    /// BinRAW path payload, one two-character hex token per byte
    pub hex_payload: Vec<String>,
    pub metadata: CaptureMetadata,
}

/// Parameters for BinRAW run-length expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRawParams {
    pub time_unit: i64,
    pub bit_count: Option<usize>,
}

/// Resolved payload of a capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// Durations taken verbatim from `RAW_Data`
    Raw(TimingSequence),
    /// Hex bytes to be expanded with [`crate::binraw::decode`]
    BinRaw {
        payload: Vec<String>,
        params: BinRawParams,
    },
}

/// Which encoding produced a timing sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Raw,
    BinRaw,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Raw => write!(f, "RAW"),
            Encoding::BinRaw => write!(f, "BinRAW"),
        }
    }
}

impl CaptureRecord {
    /// Select the decoding path.
    ///
    /// BinRAW is used only when the protocol says so, there is a payload and a
    /// time unit was declared. Everything else falls back to the RAW timings,
    /// which may be empty.
    pub fn into_capture(self) -> Capture {
        match (self.protocol, self.time_unit) {
            (Some(Protocol::BinRaw), Some(time_unit)) if !self.hex_payload.is_empty() => {
                Capture::BinRaw {
                    payload: self.hex_payload,
                    params: BinRawParams {
                        time_unit,
                        bit_count: self.bit_count,
                    },
                }
            }
            _ => Capture::Raw(self.raw_timings),
        }
    }
}

impl Capture {
    pub fn encoding(&self) -> Encoding {
        match self {
            Capture::Raw(_) => Encoding::Raw,
            Capture::BinRaw { .. } => Encoding::BinRaw,
        }
    }

    /// Produce the final timing sequence
    pub fn into_timings(self) -> Result<TimingSequence> {
        match self {
            Capture::Raw(timings) => Ok(timings),
            Capture::BinRaw { payload, params } => {
                crate::binraw::decode(&payload, params.time_unit, params.bit_count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binraw_record() -> CaptureRecord {
        CaptureRecord {
            protocol: Some(Protocol::BinRaw),
            time_unit: Some(100),
            bit_count: Some(8),
            raw_timings: vec![1, 2, 3],
            hex_payload: vec!["FF".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_protocol_tags() {
        assert_eq!(Protocol::from_tag("RAW"), Protocol::Raw);
        assert_eq!(Protocol::from_tag("BinRAW"), Protocol::BinRaw);
        assert_eq!(Protocol::from_tag("binraw"), Protocol::Other("binraw".to_string()));
        assert_eq!(Protocol::from_tag("Princeton").to_string(), "Princeton");
    }

    #[test]
    fn test_binraw_selected_when_complete() {
        let capture = binraw_record().into_capture();
        assert_eq!(capture.encoding(), Encoding::BinRaw);
        assert_eq!(capture.into_timings().unwrap(), vec![800]);
    }

    #[test]
    fn test_binraw_falls_back_without_time_unit() {
        let record = CaptureRecord {
            time_unit: None,
            ..binraw_record()
        };
        assert_eq!(record.into_capture(), Capture::Raw(vec![1, 2, 3]));
    }

    #[test]
    fn test_binraw_falls_back_without_payload() {
        let record = CaptureRecord {
            hex_payload: Vec::new(),
            ..binraw_record()
        };
        assert_eq!(record.into_capture().encoding(), Encoding::Raw);
    }

    #[test]
    fn test_raw_protocol_ignores_hex_payload() {
        let record = CaptureRecord {
            protocol: Some(Protocol::Raw),
            ..binraw_record()
        };
        assert_eq!(record.into_capture(), Capture::Raw(vec![1, 2, 3]));
    }

    #[test]
    fn test_protocol_string_conversion() {
        assert_eq!(String::from(Protocol::BinRaw), "BinRAW");
        assert_eq!(Protocol::from("RAW".to_string()), Protocol::Raw);
    }
}
