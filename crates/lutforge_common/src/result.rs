//! Common result and error types for the lutforge toolkit.

use std::fmt;

/// The standard result type for fallible LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors raised when a caller violates the input contract of a LUT operation.
///
/// None of these are recovered internally. The enclosing CAD flow is expected
/// to treat them as fatal for the affected LUT cell.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LutError {
    /// A LUT width outside the supported range was requested.
    #[error("unsupported number of LUT inputs {count}: must be between 1 and 6")]
    InputCount {
        /// The rejected input count.
        count: u32,
    },

    /// An equation references a LUT input pin that does not exist.
    #[error("LUT input index A{index} is out of range: must be between A1 and A6")]
    InputIndex {
        /// The rejected pin index.
        index: u32,
    },

    /// Text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A required field was never supplied to a builder.
    #[error("missing required field: {field}")]
    Missing {
        /// Name of the absent field.
        field: &'static str,
    },
}

impl LutError {
    /// Creates an error for a field a builder requires but never received.
    pub fn missing(field: &'static str) -> Self {
        LutError::Missing { field }
    }
}

/// The kind of text a [`ParseError`] was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseTarget {
    /// A `0x…`/`0b…` truth-table literal.
    InitString,
    /// An infix LUT equation such as `(A1*~A2)`.
    Equation,
    /// A full `#MODE:PIN=value` LUT configuration attribute.
    Attribute,
}

impl fmt::Display for ParseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTarget::InitString => write!(f, "init string"),
            ParseTarget::Equation => write!(f, "LUT equation"),
            ParseTarget::Attribute => write!(f, "LUT attribute"),
        }
    }
}

/// Malformed text passed to one of the LUT parsers.
///
/// Carries the full input along with the byte offset and the offending
/// fragment so the message points at the exact problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {target} '{input}': {reason} at offset {offset} (near '{fragment}')")]
pub struct ParseError {
    /// What was being parsed.
    pub target: ParseTarget,
    /// The complete text that failed to parse.
    pub input: String,
    /// Byte offset of the problem within `input`.
    pub offset: usize,
    /// The remainder of the input starting at `offset` (empty at end of input).
    pub fragment: String,
    /// Human-readable description of the problem.
    pub reason: String,
}

impl ParseError {
    /// Creates a parse error located at byte `offset` of `input`.
    pub fn new(
        target: ParseTarget,
        input: &str,
        offset: usize,
        reason: impl Into<String>,
    ) -> Self {
        let offset = offset.min(input.len());
        let fragment = input.get(offset..).unwrap_or_default().to_string();
        Self {
            target,
            input: input.to_string(),
            offset,
            fragment,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_input_count() {
        let err = LutError::InputCount { count: 7 };
        assert_eq!(
            format!("{err}"),
            "unsupported number of LUT inputs 7: must be between 1 and 6"
        );
    }

    #[test]
    fn display_missing() {
        let err = LutError::missing("left");
        assert_eq!(format!("{err}"), "missing required field: left");
    }

    #[test]
    fn parse_error_captures_fragment() {
        let err = ParseError::new(ParseTarget::Equation, "(A1*A9)", 4, "unknown input");
        assert_eq!(err.fragment, "A9)");
        assert_eq!(err.offset, 4);
        assert_eq!(
            format!("{err}"),
            "invalid LUT equation '(A1*A9)': unknown input at offset 4 (near 'A9)')"
        );
    }

    #[test]
    fn parse_error_offset_clamped() {
        let err = ParseError::new(ParseTarget::InitString, "0x", 10, "no digits");
        assert_eq!(err.offset, 2);
        assert!(err.fragment.is_empty());
    }

    #[test]
    fn parse_error_converts_transparently() {
        let err: LutError = ParseError::new(ParseTarget::Attribute, "#LUT", 4, "expected ':'").into();
        assert!(matches!(err, LutError::Parse(_)));
        assert!(format!("{err}").starts_with("invalid LUT attribute '#LUT'"));
    }
}
