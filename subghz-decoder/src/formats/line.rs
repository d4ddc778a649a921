//! Line classification for `.sub` capture files
//!
//! Each line of a capture file is either a `Name: value` header, a continuation
//! of the previous data section, or blank.

use std::fmt;

/// Header names understood by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Filetype,
    Version,
    Frequency,
    Preset,
    Protocol,
    Bit,
    Te,
    RawData,
    DataRaw,
    BitRaw,
}

impl FieldName {
    pub const ALL: [FieldName; 10] = [
        FieldName::Filetype,
        FieldName::Version,
        FieldName::Frequency,
        FieldName::Preset,
        FieldName::Protocol,
        FieldName::Bit,
        FieldName::Te,
        FieldName::RawData,
        FieldName::DataRaw,
        FieldName::BitRaw,
    ];

    /// Spelling used in capture files
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Filetype => "Filetype",
            FieldName::Version => "Version",
            FieldName::Frequency => "Frequency",
            FieldName::Preset => "Preset",
            FieldName::Protocol => "Protocol",
            FieldName::Bit => "Bit",
            FieldName::Te => "TE",
            FieldName::RawData => "RAW_Data",
            FieldName::DataRaw => "Data_RAW",
            FieldName::BitRaw => "Bit_RAW",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural role of one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `<Identifier>: <value>` with a recognized identifier; value is trimmed
    FieldHeader(FieldName, &'a str),
    /// Any other non-empty line, split on whitespace
    Continuation(Vec<&'a str>),
    Blank,
}

/// Classify a line that has already been trimmed.
pub fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }

    if let Some((name, value)) = line.split_once(':') {
        if let Some(field) = FieldName::from_name(name) {
            return Line::FieldHeader(field, value.trim());
        }
    }

    Line::Continuation(line.split_whitespace().collect())
}
