//! Shared foundational types used across the lutforge LUT toolkit.
//!
//! This crate provides the error taxonomy shared by every lutforge crate and
//! the validated [`NumInputs`] width type that bounds LUT truth tables.

#![warn(missing_docs)]

pub mod inputs;
pub mod result;

pub use inputs::{row_mask, NumInputs, MAX_SUPPORTED_INPUTS, MIN_SUPPORTED_INPUTS};
pub use result::{LutError, LutResult, ParseError, ParseTarget};
