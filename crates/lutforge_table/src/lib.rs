//! Truth-table encoding of LUT logic functions.
//!
//! A [`TruthTable`] is the bit vector stored in a LUT's configuration bits
//! (the INIT string). Bit `r` holds the LUT output for the input assignment
//! whose binary value is `r`, with `A1` as the least significant input.
//! Every distinct function of a given width has exactly one truth table, so
//! truth tables are the canonical form for functional comparison.

#![warn(missing_docs)]

pub mod table;
pub mod text;

pub use table::{TruthTable, INPUT_PATTERNS};
