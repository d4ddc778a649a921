//! Capture file format handling
//!
//! This module contains the line-level pieces of the `.sub` text format:
//! classifying lines and accumulating the payload of the data sections.

pub mod accumulator;
pub mod line;

// Re-export parser types
pub use accumulator::{is_hex_byte, PayloadAccumulator};
pub use line::{classify, FieldName, Line};
