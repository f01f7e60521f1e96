//! Boolean LUT equations.
//!
//! An [`Expression`] is a strict tree over three node kinds: constants,
//! possibly inverted LUT inputs (`A1`..`A6`), and binary AND/OR/XOR
//! operations. Equality is structural and operand order matters, so two
//! functionally equivalent equations are only equal if they are written the
//! same way.
//!
//! The text form is the fully parenthesized infix notation used in XDL LUT
//! attributes:
//!
//! ```text
//! 0  1  A3  ~A3  (A1*A2)  (A1+A2)  (A1@A2)  ((A6+~A6)*A4)
//! ```

#![warn(missing_docs)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{BinaryOpBuilder, BinaryOperation, Expression, LutInput, OpType};
pub use parser::parse_equation;
