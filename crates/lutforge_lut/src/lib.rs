//! LUT logic functions for the lutforge toolkit.
//!
//! This crate ties the two representations of a LUT function together:
//!
//! - [`codec`] converts between [`TruthTable`] and [`Expression`]
//! - [`LutContents`] holds one authoritative form, derives the other on
//!   demand and answers input-usage queries
//! - [`LutConfig`] wraps contents with an operating mode and output pin, and
//!   reads and writes the `#MODE:PIN=value` attribute form
//!
//! # Usage
//!
//! ```
//! use lutforge_lut::{LutConfig, LutContents};
//!
//! let mut contents = LutContents::from_equation("(A2+~A6)", 6).unwrap();
//! assert_eq!(contents.required_inputs().into_iter().collect::<Vec<_>>(), vec![2, 6]);
//! contents.reduce_to_min_size();
//! assert_eq!(contents.expression().to_string(), "(~A2+A1)");
//!
//! let config = LutConfig::parse_xdl_attribute("#LUT:O6=A1*A2", 6).unwrap();
//! assert_eq!(config.to_xdl_attribute_value(), "#LUT:O6=(A1*A2)");
//! ```

#![warn(missing_docs)]

pub mod codec;
pub mod contents;
pub mod lut_config;

pub use codec::{to_expression, to_truth_table};
pub use contents::LutContents;
pub use lut_config::{LutConfig, LutConfigBuilder, OperatingMode};
pub use lutforge_eqn::Expression;
pub use lutforge_table::TruthTable;
