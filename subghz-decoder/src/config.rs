//! Rendering configuration types
//!
//! Decoding itself has no knobs; these settings control how a timing sequence
//! is turned into an array declaration.

use serde::{Deserialize, Serialize};

/// Entries per line in rendered arrays unless configured otherwise
pub const DEFAULT_VALUES_PER_LINE: usize = 20;

/// What to do with durations that do not fit in `int16_t`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Fail the render with `InvalidArgument`
    #[default]
    Reject,
    /// Clamp to `[-32768, 32767]`
    Saturate,
    /// Declare an `int32_t` array when needed
    Widen,
}

/// Configuration for the array renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Array entries per output line (must be non-zero)
    #[serde(default = "default_values_per_line")]
    pub values_per_line: usize,

    /// Handling of durations wider than 16 bits
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

fn default_values_per_line() -> usize {
    DEFAULT_VALUES_PER_LINE
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            values_per_line: DEFAULT_VALUES_PER_LINE,
            overflow: OverflowPolicy::default(),
        }
    }
}

impl RenderConfig {
    /// Create a render configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set entries per line
    pub fn with_values_per_line(mut self, values_per_line: usize) -> Self {
        self.values_per_line = values_per_line;
        self
    }

    /// Builder method: set the overflow policy
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }
}
