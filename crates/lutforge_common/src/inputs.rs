//! Validated LUT widths.

use crate::result::{LutError, LutResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest LUT width supported by the toolkit.
pub const MIN_SUPPORTED_INPUTS: u32 = 1;

/// Largest LUT width supported by the toolkit (the 6-input LUTs of the
/// target devices).
pub const MAX_SUPPORTED_INPUTS: u32 = 6;

/// The number of logical inputs of a LUT, guaranteed to lie in `1..=6`.
///
/// Validating the width once up front lets truth-table constructors and
/// resizes downstream stay infallible.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct NumInputs(u32);

impl NumInputs {
    /// The full six-input width.
    pub const SIX: NumInputs = NumInputs(MAX_SUPPORTED_INPUTS);

    /// Validates `count` as a LUT width.
    pub fn new(count: u32) -> LutResult<Self> {
        if (MIN_SUPPORTED_INPUTS..=MAX_SUPPORTED_INPUTS).contains(&count) {
            Ok(Self(count))
        } else {
            Err(LutError::InputCount { count })
        }
    }

    /// Returns the width as a plain integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of rows in a truth table of this width (`2^n`).
    pub fn rows(self) -> u32 {
        1 << self.0
    }

    /// Mask selecting the `2^n` significant bits of a truth table value.
    pub fn mask(self) -> u64 {
        row_mask(self.0)
    }
}

/// Mask of the `2^width` low-order bits, valid for widths `0..=6`.
pub fn row_mask(width: u32) -> u64 {
    let rows = 1u32 << width;
    if rows >= 64 {
        u64::MAX
    } else {
        (1u64 << rows) - 1
    }
}

impl TryFrom<u32> for NumInputs {
    type Error = LutError;

    fn try_from(count: u32) -> LutResult<Self> {
        NumInputs::new(count)
    }
}

impl From<NumInputs> for u32 {
    fn from(n: NumInputs) -> u32 {
        n.0
    }
}

impl fmt::Debug for NumInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NumInputs({})", self.0)
    }
}

impl fmt::Display for NumInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
