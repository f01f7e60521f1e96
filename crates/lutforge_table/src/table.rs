//! The [`TruthTable`] value type, resizing and input sensitivity.

use lutforge_common::{LutError, LutResult, NumInputs};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::trace;

/// Row-selection patterns for the six LUT inputs.
///
/// Bit `r` of `INPUT_PATTERNS[i]` is set exactly when input `A(i+1)` is 1 in
/// row `r`. Each pattern is also the six-input truth table of that input.
pub const INPUT_PATTERNS: [u64; 6] = [
    0xAAAA_AAAA_AAAA_AAAA,
    0xCCCC_CCCC_CCCC_CCCC,
    0xF0F0_F0F0_F0F0_F0F0,
    0xFF00_FF00_FF00_FF00,
    0xFFFF_0000_FFFF_0000,
    0xFFFF_FFFF_0000_0000,
];

/// The truth table of a LUT with 1 to 6 inputs.
///
/// Only the low `2^num_inputs` bits of the value are significant; anything
/// above them is discarded on construction, resize and parse. Equality
/// compares both the bits and the declared width, so the same bits at two
/// different widths are different tables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "TableRepr", try_from = "TableRepr")]
pub struct TruthTable {
    value: u64,
    num_inputs: NumInputs,
}

impl TruthTable {
    /// Creates a truth table of `num_inputs` inputs from `value`.
    ///
    /// Bits above the table width are silently truncated. Fails if
    /// `num_inputs` is not in `1..=6`.
    pub fn new(value: u64, num_inputs: u32) -> LutResult<Self> {
        Ok(Self::with_inputs(value, NumInputs::new(num_inputs)?))
    }

    /// Creates a truth table of an already validated width.
    pub fn with_inputs(value: u64, num_inputs: NumInputs) -> Self {
        Self {
            value: value & num_inputs.mask(),
            num_inputs,
        }
    }

    /// Creates the constant-0 or constant-1 table of the given width.
    pub fn constant(value: bool, num_inputs: NumInputs) -> Self {
        Self::with_inputs(if value { u64::MAX } else { 0 }, num_inputs)
    }

    /// Returns the significant bits of the table.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Returns the number of inputs of the table.
    pub fn num_inputs(&self) -> u32 {
        self.num_inputs.get()
    }

    /// Returns the validated width of the table.
    pub fn width(&self) -> NumInputs {
        self.num_inputs
    }

    /// Resizes the table in place to `num_inputs` inputs.
    ///
    /// Shrinking keeps the low `2^num_inputs` bits. Growing duplicates the
    /// bit pattern until the new width is filled, which makes the function
    /// independent of the added inputs. Fails without modifying the table if
    /// `num_inputs` is not in `1..=6`.
    pub fn resize(&mut self, num_inputs: u32) -> LutResult<&mut Self> {
        let num_inputs = NumInputs::new(num_inputs)?;
        Ok(self.resize_to(num_inputs))
    }

    /// Resizes the table in place to an already validated width.
    pub fn resize_to(&mut self, num_inputs: NumInputs) -> &mut Self {
        let from = self.num_inputs.get();
        let to = num_inputs.get();
        if to > from {
            for i in from..to {
                self.value |= self.value << (1u32 << i);
            }
        } else if to < from {
            self.value &= num_inputs.mask();
        }
        if from != to {
            trace!(from, to, value = self.value, "resized truth table");
        }
        self.num_inputs = num_inputs;
        self
    }

    /// Returns a resized copy of the table, leaving `self` untouched.
    pub fn resized(&self, num_inputs: u32) -> LutResult<Self> {
        let mut copy = *self;
        copy.resize(num_inputs)?;
        Ok(copy)
    }

    /// Returns the output for the input assignment `row`.
    ///
    /// Rows beyond the table are reported as 0.
    pub fn bit(&self, row: u32) -> bool {
        row < self.num_inputs.rows() && (self.value >> row) & 1 != 0
    }

    /// Returns `Some(v)` if the table outputs `v` for every assignment.
    pub fn is_constant(&self) -> Option<bool> {
        if self.value == 0 {
            Some(false)
        } else if self.value == self.num_inputs.mask() {
            Some(true)
        } else {
            None
        }
    }

    /// Splits the table on input `A{input}`.
    ///
    /// Returns the cofactors with the input held at 0 and at 1, each kept at
    /// the full table width so that neither depends on `A{input}`. Returns
    /// `None` for inputs outside the table width.
    pub fn cofactors(&self, input: u32) -> Option<(TruthTable, TruthTable)> {
        if input == 0 || input > self.num_inputs.get() {
            return None;
        }
        let pattern = INPUT_PATTERNS[(input - 1) as usize];
        let stride = 1u32 << (input - 1);
        let low = self.value & !pattern;
        let high = (self.value & pattern) >> stride;
        Some((
            Self::with_inputs(low | (low << stride), self.num_inputs),
            Self::with_inputs(high | (high << stride), self.num_inputs),
        ))
    }

    /// Returns true if toggling input `A{input}` changes the output for at
    /// least one assignment of the other inputs.
    ///
    /// Inputs outside the table width never matter.
    pub fn depends_on(&self, input: u32) -> bool {
        self.cofactors(input)
            .is_some_and(|(low, high)| low != high)
    }

    /// Returns the inputs the function is sensitive to, in ascending order.
    pub fn required_inputs(&self) -> BTreeSet<u32> {
        (1..=self.num_inputs.get())
            .filter(|&i| self.depends_on(i))
            .collect()
    }
}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TruthTable({self}, {})", self.num_inputs)
    }
}

/// Serialized form: the canonical hex literal plus the width.
#[derive(Serialize, Deserialize)]
struct TableRepr {
    init: String,
    num_inputs: u32,
}

impl From<TruthTable> for TableRepr {
    fn from(table: TruthTable) -> Self {
        TableRepr {
            init: table.to_string(),
            num_inputs: table.num_inputs(),
        }
    }
}

impl TryFrom<TableRepr> for TruthTable {
    type Error = LutError;

    fn try_from(repr: TableRepr) -> LutResult<Self> {
        TruthTable::parse(&repr.init, repr.num_inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(value: u64, n: u32) -> TruthTable {
        TruthTable::new(value, n).unwrap()
    }

    #[test]
    fn construct_with_six_inputs() {
        let t = table(0x6FFF_FFFF_EEEE, 6);
        assert_eq!(t.value(), 0x6FFF_FFFF_EEEE);
        assert_eq!(t.num_inputs(), 6);
    }

    #[test]
    fn constructor_truncates() {
        assert_eq!(table(0x0F_FFFF_FFFE, 5).value(), 0x0_FFFF_FFFE);
        assert_eq!(table(0x0F_FFFF_FFFE, 4).value(), 0x0FFFE);
        assert_eq!(table(0x0F_FFFF_FFFE, 2).value(), 0xE);
        assert_eq!(table(0x0F_FFFF_FFFE, 1).value(), 0x2);
    }

    #[test]
    fn truncation_matches_mask_for_all_widths() {
        let value = 0xDEAD_BEEF_0123_4567;
        for n in 1..=6u32 {
            let bits = 1u32 << n;
            let mask = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
            assert_eq!(table(value, n).value(), value & mask);
        }
    }

    #[test]
    fn constructor_rejects_bad_widths() {
        assert_eq!(TruthTable::new(0x0F, 7), Err(LutError::InputCount { count: 7 }));
        assert_eq!(TruthTable::new(0x0F, 0), Err(LutError::InputCount { count: 0 }));
    }

    #[test]
    fn resize_rejects_bad_widths_without_change() {
        let mut t = table(0x0F, 6);
        assert!(t.resize(7).is_err());
        assert!(t.resize(0).is_err());
        assert_eq!(t, table(0x0F, 6));
    }

    #[test]
    fn downsize_truncates() {
        let mut t = table(0x0F_FFFF_FFFE, 6);
        t.resize(5).unwrap();
        assert_eq!(t.value(), 0xFFFF_FFFE);

        let mut t = table(0x0F_FFFF_FFFE, 6);
        t.resize(2).unwrap();
        assert_eq!(t.value(), 0xE);

        let mut t = table(0x0F_FFFF_FFFE, 6);
        t.resize(1).unwrap();
        assert_eq!(t.value(), 2);
    }

    #[test]
    fn resize_same_size_is_noop() {
        for (value, n) in [(0x0F_FFFF_FFFE, 6), (0x0FFE, 5), (2, 1)] {
            let mut t = table(value, n);
            t.resize(n).unwrap();
            assert_eq!(t.value(), value);
            assert_eq!(t.num_inputs(), n);
        }
    }

    #[test]
    fn upsize_duplicates() {
        assert_eq!(table(1, 1).resized(5).unwrap().value(), 0x5555_5555);
        assert_eq!(table(1, 1).resized(6).unwrap().value(), 0x5555_5555_5555_5555);
        assert_eq!(table(1, 4).resized(5).unwrap().value(), 0x0001_0001);
        assert_eq!(table(1, 4).resized(6).unwrap().value(), 0x0001_0001_0001_0001);
    }

    #[test]
    fn resize_updates_width() {
        assert_eq!(table(1, 4).resized(5).unwrap().num_inputs(), 5);
        assert_eq!(table(1, 4).resized(4).unwrap().num_inputs(), 4);
        assert_eq!(table(1, 4).resized(3).unwrap().num_inputs(), 3);
    }

    #[test]
    fn resize_chains() {
        let mut t = table(0xB, 2);
        let grown = t.resize(4).unwrap().resize(6).unwrap().value();
        assert_eq!(grown, 0xBBBB_BBBB_BBBB_BBBB);
    }

    #[test]
    fn grow_preserves_low_bits_but_shrink_loses_information() {
        let original = table(0x1234_5678_9ABC_DEF0, 6);
        let round = original.resized(3).unwrap().resized(6).unwrap();
        assert_eq!(round.value(), 0xF0F0_F0F0_F0F0_F0F0);
        assert_ne!(round, original);

        let small = table(0x96, 3);
        assert_eq!(small.resized(6).unwrap().value() & 0xFF, 0x96);
    }

    #[test]
    fn equality_checks_width() {
        assert_eq!(table(1, 4), table(1, 4));
        assert_ne!(table(1, 4), table(1, 5));
    }

    #[test]
    fn bits_and_constants() {
        let t = table(0b0110, 2);
        assert!(!t.bit(0));
        assert!(t.bit(1));
        assert!(t.bit(2));
        assert!(!t.bit(3));
        assert!(!t.bit(4));
        assert_eq!(t.is_constant(), None);
        assert_eq!(table(0, 3).is_constant(), Some(false));
        assert_eq!(table(u64::MAX, 3).is_constant(), Some(true));
        assert_eq!(TruthTable::constant(true, NumInputs::SIX).value(), u64::MAX);
    }

    #[test]
    fn sensitivity() {
        // A6 & ~A5
        let t = table(INPUT_PATTERNS[5] & !INPUT_PATTERNS[4], 6);
        assert!(t.depends_on(6));
        assert!(t.depends_on(5));
        assert!(!t.depends_on(1));
        assert!(!t.depends_on(7));
        assert!(!t.depends_on(0));
        assert_eq!(t.required_inputs().into_iter().collect::<Vec<_>>(), vec![5, 6]);

        assert!(table(0, 6).required_inputs().is_empty());
        assert!(table(u64::MAX, 6).required_inputs().is_empty());
    }

    #[test]
    fn cofactors_fix_one_input() {
        // (A1 & A2) | (~A1 & A3) at 3 inputs
        let t = table(0b1101_1000, 3);
        let (low, high) = t.cofactors(1).unwrap();
        // A1=0 leaves A3
        assert_eq!(low.value(), INPUT_PATTERNS[2] & 0xFF);
        // A1=1 leaves A2
        assert_eq!(high.value(), INPUT_PATTERNS[1] & 0xFF);
        assert!(!low.depends_on(1));
        assert!(!high.depends_on(1));
        assert!(t.cofactors(0).is_none());
        assert!(t.cofactors(4).is_none());
    }

    #[test]
    fn serde_uses_hex_literal() {
        let t = table(0x0E, 4);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"init":"0x000E","num_inputs":4}"#);
        let back: TruthTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<TruthTable>(r#"{"init":"0x0E","num_inputs":8}"#).is_err());
    }
}
