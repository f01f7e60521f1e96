//! Text forms of truth tables: `0x…` hexadecimal and `0b…` binary literals.

use crate::table::TruthTable;
use lutforge_common::{LutResult, NumInputs, ParseError, ParseTarget};
use std::fmt;

const HEX_PREFIX: &str = "0x";
const BINARY_PREFIX: &str = "0b";

/// Most digits a literal may carry before it no longer fits in 64 bits.
const MAX_HEX_DIGITS: usize = 16;
const MAX_BINARY_DIGITS: usize = 64;

impl TruthTable {
    /// Number of hex digits in the canonical text form: one per four rows,
    /// but never fewer than one.
    pub fn hex_digit_count(&self) -> usize {
        (self.width().rows() as usize / 4).max(1)
    }

    /// Formats the table as `0b` followed by exactly `2^n` binary digits.
    pub fn to_binary_string(&self) -> String {
        format!(
            "{BINARY_PREFIX}{:0width$b}",
            self.value(),
            width = self.width().rows() as usize
        )
    }

    /// Parses a `0x…` or `0b…` literal into a table of `num_inputs` inputs.
    ///
    /// Hex digits may be upper or lower case. Shorter literals are
    /// zero-extended and bits beyond the table width are truncated, exactly
    /// as for [`TruthTable::new`].
    pub fn parse(text: &str, num_inputs: u32) -> LutResult<Self> {
        let num_inputs = NumInputs::new(num_inputs)?;
        Self::parse_with(text, num_inputs)
    }

    /// Parses a literal into a table of an already validated width.
    pub fn parse_with(text: &str, num_inputs: NumInputs) -> LutResult<Self> {
        let value = parse_literal(text)?;
        Ok(Self::with_inputs(value, num_inputs))
    }
}

/// Parses the digits of an init-string literal into its raw value.
fn parse_literal(text: &str) -> Result<u64, ParseError> {
    let err = |offset: usize, reason: &str| ParseError::new(ParseTarget::InitString, text, offset, reason);

    let (digits, radix, max_digits) = if let Some(rest) = text.strip_prefix(HEX_PREFIX) {
        (rest, 16, MAX_HEX_DIGITS)
    } else if let Some(rest) = text.strip_prefix(BINARY_PREFIX) {
        (rest, 2, MAX_BINARY_DIGITS)
    } else {
        return Err(err(0, "expected a '0x' or '0b' prefix"));
    };
    let start = text.len() - digits.len();

    if digits.is_empty() {
        return Err(err(start, "no digits after prefix"));
    }
    if digits.len() > max_digits {
        return Err(err(start + max_digits, "too many digits for a 64-bit init string"));
    }

    let mut value = 0u64;
    for (i, ch) in digits.char_indices() {
        let digit = ch
            .to_digit(radix)
            .ok_or_else(|| err(start + i, "unrecognized character"))?;
        value = (value << radix.trailing_zeros()) | u64::from(digit);
    }
    Ok(value)
}

impl fmt::Display for TruthTable {
    /// Formats the table in canonical hex form, e.g. `0x000E` for 4 inputs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{HEX_PREFIX}{:0width$X}",
            self.value(),
            width = self.hex_digit_count()
        )
    }
}
