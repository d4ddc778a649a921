//! Array rendering
//!
//! Formats timing sequences as C array declarations for microcontroller
//! sketches:
//!
//! ```text
//! const int16_t signalOn[] = {
//!   350, -1050, ...
//! };
//! const int signalOnLength = 42;
//! ```

use crate::config::{OverflowPolicy, RenderConfig};
use crate::types::{DecoderError, Result, Timing};
use std::borrow::Cow;
use std::fmt;

/// First lines of a generated header file
pub const HEADER_PREAMBLE: &str =
    "// Generated RF signal arrays for ESP32\n// Copy these into your Arduino sketch\n\n";

/// C element type of a rendered array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Int16,
    Int32,
}

impl ElementType {
    pub fn c_type(self) -> &'static str {
        match self {
            ElementType::Int16 => "int16_t",
            ElementType::Int32 => "int32_t",
        }
    }

    fn holds(self, value: Timing) -> bool {
        match self {
            ElementType::Int16 => i16::try_from(value).is_ok(),
            ElementType::Int32 => i32::try_from(value).is_ok(),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_type())
    }
}

/// Render an `int16_t` array named `name`, wrapping every `values_per_line`
/// entries (zero is treated as one).
///
/// Values are written as given; keeping them inside 16 bits is up to the
/// caller. [`ArrayRenderer`] applies an [`OverflowPolicy`] first.
pub fn render(timings: &[Timing], name: &str, values_per_line: usize) -> String {
    render_array(ElementType::Int16, timings, name, values_per_line)
}

fn render_array(
    element: ElementType,
    timings: &[Timing],
    name: &str,
    values_per_line: usize,
) -> String {
    let per_line = values_per_line.max(1);
    let mut output = format!("const {} {}[] = {{\n  ", element, name);

    for (i, timing) in timings.iter().enumerate() {
        output.push_str(&timing.to_string());

        if i + 1 < timings.len() {
            // Wrapped lines keep the trailing space after the comma
            output.push_str(", ");
            if (i + 1) % per_line == 0 {
                output.push_str("\n  ");
            }
        }
    }

    output.push_str("\n};\n");
    output.push_str(&format!("const int {}Length = {};\n", name, timings.len()));
    output
}

/// Fit a timing sequence into an array element type according to `policy`
pub fn fit_width(
    timings: &[Timing],
    policy: OverflowPolicy,
) -> Result<(ElementType, Cow<'_, [Timing]>)> {
    match policy {
        OverflowPolicy::Reject => {
            check_fits(timings, ElementType::Int16)?;
            Ok((ElementType::Int16, Cow::Borrowed(timings)))
        }
        OverflowPolicy::Saturate => {
            let clamped: Vec<Timing> = timings
                .iter()
                .map(|&t| t.clamp(i16::MIN as Timing, i16::MAX as Timing))
                .collect();
            Ok((ElementType::Int16, Cow::Owned(clamped)))
        }
        OverflowPolicy::Widen => {
            if timings.iter().all(|&t| ElementType::Int16.holds(t)) {
                Ok((ElementType::Int16, Cow::Borrowed(timings)))
            } else {
                check_fits(timings, ElementType::Int32)?;
                log::debug!("Widening array to int32_t");
                Ok((ElementType::Int32, Cow::Borrowed(timings)))
            }
        }
    }
}

fn check_fits(timings: &[Timing], element: ElementType) -> Result<()> {
    match timings.iter().position(|&t| !element.holds(t)) {
        Some(index) => Err(DecoderError::InvalidArgument(format!(
            "timing value {} at index {} does not fit in {}",
            timings[index], index, element
        ))),
        None => Ok(()),
    }
}

/// Renderer with a validated [`RenderConfig`]
#[derive(Debug, Clone, Default)]
pub struct ArrayRenderer {
    config: RenderConfig,
}

impl ArrayRenderer {
    pub fn new(config: RenderConfig) -> Result<Self> {
        if config.values_per_line == 0 {
            return Err(DecoderError::InvalidArgument(
                "values_per_line must be at least 1".to_string(),
            ));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render one array block after applying the overflow policy
    pub fn render(&self, timings: &[Timing], name: &str) -> Result<String> {
        let (element, values) = fit_width(timings, self.config.overflow)?;
        Ok(render_array(
            element,
            &values,
            name,
            self.config.values_per_line,
        ))
    }
}

/// Join rendered blocks into header-file text
pub fn render_header<S: AsRef<str>>(blocks: &[S]) -> String {
    let body: Vec<&str> = blocks.iter().map(|block| block.as_ref()).collect();
    format!("{}{}", HEADER_PREAMBLE, body.join("\n"))
}

/// Placeholder block for an input file that does not exist
pub fn render_missing(file_name: &str) -> String {
    format!("// Error: {} not found\n", file_name)
}

/// Placeholder block for an input file that failed to decode or render
pub fn render_failure(file_name: &str, error: &dyn fmt::Display) -> String {
    format!("// Error: {}: {}\n", file_name, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_VALUES_PER_LINE;

    #[test]
    fn test_render_wraps_lines() {
        let text = render(&[1, -2, 3], "sig", 2);
        assert_eq!(
            text,
            "const int16_t sig[] = {\n  1, -2, \n  3\n};\nconst int sigLength = 3;\n"
        );
    }

    #[test]
    fn test_render_no_wrap_after_last_value() {
        let text = render(&[1, 2, 3, 4], "sig", 2);
        assert_eq!(
            text,
            "const int16_t sig[] = {\n  1, 2, \n  3, 4\n};\nconst int sigLength = 4;\n"
        );
    }

    #[test]
    fn test_render_default_width() {
        let timings: Vec<Timing> = (1..=21).collect();
        let text = render(&timings, "signalOn", DEFAULT_VALUES_PER_LINE);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "const int16_t signalOn[] = {");
        assert!(lines[1].ends_with("19, 20, "));
        assert_eq!(lines[2], "  21");
        assert_eq!(lines[4], "const int signalOnLength = 21;");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(
            render(&[], "empty", 20),
            "const int16_t empty[] = {\n  \n};\nconst int emptyLength = 0;\n"
        );
    }

    #[test]
    fn test_reject_policy() {
        let renderer = ArrayRenderer::default();
        assert!(renderer.render(&[32767, -32768], "ok").is_ok());
        let err = renderer.render(&[10, 40000], "big").unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_saturate_policy() {
        let renderer =
            ArrayRenderer::new(RenderConfig::new().with_overflow(OverflowPolicy::Saturate))
                .unwrap();
        let text = renderer.render(&[40000, -40000, 5], "s").unwrap();
        assert!(text.contains("32767, -32768, 5"));
        assert!(text.starts_with("const int16_t s[]"));
    }

    #[test]
    fn test_widen_policy() {
        let renderer =
            ArrayRenderer::new(RenderConfig::new().with_overflow(OverflowPolicy::Widen)).unwrap();
        assert!(renderer
            .render(&[1, -1], "narrow")
            .unwrap()
            .starts_with("const int16_t narrow[]"));
        assert!(renderer
            .render(&[1, 70000], "wide")
            .unwrap()
            .starts_with("const int32_t wide[]"));
        assert!(renderer.render(&[i64::from(i32::MAX) + 1], "huge").is_err());
    }

    #[test]
    fn test_zero_values_per_line_rejected() {
        let result = ArrayRenderer::new(RenderConfig::new().with_values_per_line(0));
        assert!(matches!(result, Err(DecoderError::InvalidArgument(_))));
    }

    #[test]
    fn test_header_assembly() {
        let header = render_header(&[render(&[1], "a", 20), render_missing("on.sub")]);
        assert_eq!(
            header,
            "// Generated RF signal arrays for ESP32\n\
             // Copy these into your Arduino sketch\n\
             \n\
             const int16_t a[] = {\n  1\n};\nconst int aLength = 1;\n\
             \n\
             // Error: on.sub not found\n"
        );
    }

    #[test]
    fn test_render_failure() {
        assert_eq!(
            render_failure("x.sub", &"bad TE"),
            "// Error: x.sub: bad TE\n"
        );
    }
}
