//! Conversion between truth tables and equations.
//!
//! Decoding a table uses Shannon decomposition from the highest input down,
//! folding cofactors into the shortest of a fixed set of canonical shapes.
//! Encoding an equation evaluates it for every input assignment. For any
//! table `t`, encoding the decoded equation at `t`'s width gives back `t`
//! bit for bit. The reverse does not hold: decoding an encoded equation
//! yields the canonical form, not the original tree.

use lutforge_common::{row_mask, LutResult, NumInputs};
use lutforge_eqn::Expression;
use lutforge_table::TruthTable;
use tracing::debug;

/// Decodes a truth table into its canonical equation.
///
/// Constant tables become `0` or `1`. Inputs the function does not depend on
/// never appear in the result.
pub fn to_expression(table: &TruthTable) -> Expression {
    let expr = decode(table.value(), table.num_inputs());
    debug!(table = %table, equation = %expr, "decoded truth table");
    expr
}

/// Evaluates `expr` over all `2^num_inputs` input assignments.
///
/// Fails if `num_inputs` is outside `1..=6` or `expr` references an input
/// other than `A1`..`A6`. Inputs above `num_inputs` read as 0.
pub fn to_truth_table(expr: &Expression, num_inputs: u32) -> LutResult<TruthTable> {
    let width = NumInputs::new(num_inputs)?;
    expr.check_inputs()?;
    Ok(encode(expr, width))
}

/// Evaluates an equation whose inputs are already known to be in range.
pub(crate) fn encode(expr: &Expression, width: NumInputs) -> TruthTable {
    let value = (0..width.rows())
        .filter(|&row| expr.evaluate(row))
        .fold(0u64, |acc, row| acc | (1u64 << row));
    let table = TruthTable::with_inputs(value, width);
    debug!(equation = %expr, table = %table, "encoded equation");
    table
}

/// Decodes the low `2^width` bits of `value`, where `width` may reach 0
/// once every input has been split off.
fn decode(value: u64, width: u32) -> Expression {
    if value == 0 {
        return Expression::ZERO;
    }
    if value == row_mask(width) {
        return Expression::ONE;
    }
    // A width-0 table holds one bit, so it was caught above.
    let rest = width - 1;
    let half = 1u32 << rest;
    let mask = row_mask(rest);
    let low = value & mask;
    let high = (value >> half) & mask;
    if low == high {
        return decode(low, rest);
    }
    combine(width, decode(low, rest), decode(high, rest))
}

/// Folds the cofactors of input `A{input}` into one equation.
fn combine(input: u32, low: Expression, high: Expression) -> Expression {
    let pin = || Expression::input(input);
    let inverted = || Expression::inverted_input(input);
    match (low.as_constant(), high.as_constant()) {
        (Some(false), Some(true)) => pin(),
        (Some(true), Some(false)) => inverted(),
        (Some(false), _) => Expression::and(pin(), high),
        (_, Some(false)) => Expression::and(inverted(), low),
        (Some(true), _) => Expression::or(inverted(), high),
        (_, Some(true)) => Expression::or(pin(), low),
        _ => Expression::or(
            Expression::and(inverted(), low),
            Expression::and(pin(), high),
        ),
    }
}
