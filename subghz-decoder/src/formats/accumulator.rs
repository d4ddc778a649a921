//! Payload accumulation for the two data sections
//!
//! `RAW_Data` collects signed integers, `Data_RAW` collects hex byte tokens.
//! Both sections may continue over following lines until a line no longer
//! looks like data. The two sections stop differently:
//! - RAW keeps the integers before the first bad token on the line, then stops.
//! - Data_RAW drops the whole line if any token is not a hex byte, then stops.

use super::line::FieldName;
use crate::types::{Timing, TimingSequence};

/// Continuation lines starting with these are skipped while RAW_Data is open
const RAW_SKIP_PREFIXES: &[FieldName] = &[FieldName::Filetype];

/// Continuation lines starting with these are skipped while Data_RAW is open
const HEX_SKIP_PREFIXES: &[FieldName] = &[
    FieldName::Filetype,
    FieldName::Version,
    FieldName::Frequency,
    FieldName::Preset,
    FieldName::Protocol,
    FieldName::Bit,
    FieldName::Te,
    FieldName::BitRaw,
];

/// Accumulates payload tokens for one capture file
#[derive(Debug, Default)]
pub struct PayloadAccumulator {
    raw_timings: TimingSequence,
    hex_payload: Vec<String>,
    in_raw_data: bool,
    in_data_raw: bool,
}

impl PayloadAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle the value of a `RAW_Data:` header. Non-integers are skipped.
    pub fn open_raw_data(&mut self, value: &str) {
        self.in_raw_data = true;
        let before = self.raw_timings.len();
        self.raw_timings
            .extend(value.split_whitespace().filter_map(parse_timing));
        log::debug!(
            "RAW_Data section: {} values from header",
            self.raw_timings.len() - before
        );
    }

    /// Handle the value of a `Data_RAW:` header. Tokens are kept verbatim.
    pub fn open_data_raw(&mut self, value: &str) {
        self.in_data_raw = true;
        self.hex_payload
            .extend(value.split_whitespace().map(str::to_string));
        log::debug!("Data_RAW section: {} tokens so far", self.hex_payload.len());
    }

    /// Handle a continuation line. `line` is the trimmed text, `tokens` its
    /// whitespace split.
    pub fn continue_with(&mut self, line: &str, tokens: &[&str]) {
        if line.is_empty() {
            return;
        }

        if self.in_raw_data && !starts_with_any(line, RAW_SKIP_PREFIXES) {
            self.continue_raw(tokens);
        } else if self.in_data_raw && !starts_with_any(line, HEX_SKIP_PREFIXES) {
            self.continue_hex(tokens);
        }
    }

    fn continue_raw(&mut self, tokens: &[&str]) {
        for token in tokens {
            match parse_timing(token) {
                Some(value) => self.raw_timings.push(value),
                None => {
                    log::debug!("RAW_Data section closed at token {:?}", token);
                    self.in_raw_data = false;
                    break;
                }
            }
        }
    }

    fn continue_hex(&mut self, tokens: &[&str]) {
        if tokens.iter().all(|token| is_hex_byte(token)) {
            self.hex_payload
                .extend(tokens.iter().map(|token| token.to_string()));
        } else {
            log::debug!("Data_RAW section closed, line discarded: {:?}", tokens);
            self.in_data_raw = false;
        }
    }

    pub fn in_raw_data(&self) -> bool {
        self.in_raw_data
    }

    pub fn in_data_raw(&self) -> bool {
        self.in_data_raw
    }

    pub fn raw_timings(&self) -> &[Timing] {
        &self.raw_timings
    }

    pub fn hex_payload(&self) -> &[String] {
        &self.hex_payload
    }

    /// Consume the accumulator, returning `(raw_timings, hex_payload)`
    pub fn into_parts(self) -> (TimingSequence, Vec<String>) {
        (self.raw_timings, self.hex_payload)
    }
}

/// Parse one signed integer token; values outside `i64` count as non-integers
pub(crate) fn parse_timing(token: &str) -> Option<Timing> {
    token.parse().ok()
}

/// True for exactly two hex digits, either case
pub fn is_hex_byte(token: &str) -> bool {
    token.len() == 2 && hex::decode(token).is_ok()
}

fn starts_with_any(line: &str, fields: &[FieldName]) -> bool {
    fields.iter().any(|field| line.starts_with(field.as_str()))
}
