//! Conformance fixtures for the lutforge LUT codec.
//!
//! Provides reference truth-table/equation pairs and seeded random
//! generators for tables and equations, shared by the integration tests in
//! `tests/`.

#![warn(missing_docs)]

use lutforge_eqn::{Expression, OpType};
use lutforge_table::TruthTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used by every randomized conformance test.
pub const SEED: u64 = 0xDEAD_BEEF;

/// Number of cases in each randomized round-trip test.
pub const RANDOM_CASES: usize = 200;

/// How a reference pair is expected to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseKind {
    /// Decoding the table gives exactly the equation, and encoding the
    /// equation gives exactly the table.
    Exact,
    /// Decoding gives a two-input operation with the same operator and
    /// operands, in either order.
    AnyOperandOrder,
    /// Only encoding is checked; the decoder picks a different form.
    EncodeOnly,
}

/// A reference truth table and an equation for the same function.
#[derive(Debug, Clone)]
pub struct ConversionCase {
    /// The table.
    pub table: TruthTable,
    /// The equation.
    pub equation: Expression,
    /// Which directions are checked.
    pub kind: CaseKind,
}

impl ConversionCase {
    fn new(value: u64, num_inputs: u32, equation: Expression, kind: CaseKind) -> Self {
        let table = TruthTable::new(value, num_inputs).expect("fixture width in 1..=6");
        Self {
            table,
            equation,
            kind,
        }
    }
}

/// Returns the reference conversion table.
pub fn conversion_cases() -> Vec<ConversionCase> {
    use CaseKind::*;
    let a = Expression::input;
    let na = Expression::inverted_input;

    let mut cases = vec![
        ConversionCase::new(0, 6, Expression::ZERO, Exact),
        ConversionCase::new(0, 5, Expression::ZERO, Exact),
        ConversionCase::new(u64::MAX, 6, Expression::ONE, Exact),
        ConversionCase::new(u64::MAX, 5, Expression::ONE, Exact),
        ConversionCase::new(0x0_FFFF_FFFF, 5, Expression::ONE, Exact),
    ];

    // Each single input, plain and inverted, at five and six inputs.
    let low_halves: [u64; 6] = [
        0x5555_5555_5555_5555,
        0x3333_3333_3333_3333,
        0x0F0F_0F0F_0F0F_0F0F,
        0x00FF_00FF_00FF_00FF,
        0x0000_FFFF_0000_FFFF,
        0x0000_0000_FFFF_FFFF,
    ];
    for (i, &low) in low_halves.iter().enumerate() {
        let index = i as u32 + 1;
        cases.push(ConversionCase::new(!low, 6, a(index), Exact));
        cases.push(ConversionCase::new(low, 6, na(index), Exact));
        if index <= 5 {
            cases.push(ConversionCase::new(!low, 5, a(index), Exact));
            cases.push(ConversionCase::new(low, 5, na(index), Exact));
            cases.push(ConversionCase::new(!low & 0xFFFF_FFFF, 5, a(index), Exact));
            cases.push(ConversionCase::new(low & 0xFFFF_FFFF, 5, na(index), Exact));
        }
    }

    // A6 combined with each lower input.
    for (i, &low) in low_halves.iter().take(5).enumerate() {
        let index = i as u32 + 1;
        let inverted_and = low & 0xFFFF_FFFF;
        cases.push(ConversionCase::new(
            inverted_and,
            6,
            Expression::and(na(6), na(index)),
            AnyOperandOrder,
        ));
        cases.push(ConversionCase::new(
            !inverted_and,
            6,
            Expression::or(a(6), a(index)),
            AnyOperandOrder,
        ));
    }

    cases.push(ConversionCase::new(
        0x6666_6666_6666_6666,
        6,
        Expression::xor(a(1), a(2)),
        EncodeOnly,
    ));
    cases.push(ConversionCase::new(u64::MAX, 6, Expression::or(a(6), na(6)), EncodeOnly));
    cases.push(ConversionCase::new(0, 6, Expression::and(a(6), na(6)), EncodeOnly));
    cases
}

/// True if `actual` is a binary operation with the same operator as
/// `expected` and the same two operands, in either order.
pub fn same_operation_any_order(expected: &Expression, actual: &Expression) -> bool {
    match (expected, actual) {
        (Expression::Binary(e), Expression::Binary(a)) => {
            e.op == a.op
                && ((e.left == a.left && e.right == a.right)
                    || (e.left == a.right && e.right == a.left))
        }
        _ => false,
    }
}

/// Creates the seeded generator used by randomized tests.
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

/// Picks a LUT width, weighted toward the five- and six-input LUTs found
/// in real designs.
pub fn random_num_inputs(rng: &mut impl Rng) -> u32 {
    match rng.gen_range(0..100) {
        0..=40 => 6,
        41..=80 => 5,
        81..=86 => 4,
        87..=92 => 3,
        93..=97 => 2,
        _ => 1,
    }
}

/// Generates a random truth table.
pub fn random_table(rng: &mut impl Rng) -> TruthTable {
    let value = rng.gen::<u64>();
    let num_inputs = random_num_inputs(rng);
    TruthTable::new(value, num_inputs).expect("random width in 1..=6")
}

/// Generates a random equation tree of at most `depth` operator levels.
pub fn random_expression(rng: &mut impl Rng, depth: u32) -> Expression {
    if depth == 0 || rng.gen_bool(0.3) {
        return match rng.gen_range(0..10) {
            0 => Expression::ZERO,
            1 => Expression::ONE,
            _ => {
                let index = rng.gen_range(1..=6);
                if rng.gen_bool(0.5) {
                    Expression::inverted_input(index)
                } else {
                    Expression::input(index)
                }
            }
        };
    }
    let op = match rng.gen_range(0..3) {
        0 => OpType::And,
        1 => OpType::Or,
        _ => OpType::Xor,
    };
    let left = random_expression(rng, depth - 1);
    let right = random_expression(rng, depth - 1);
    Expression::binary(op, left, right)
}
