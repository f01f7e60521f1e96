//! Equation tree node types.

use lutforge_common::{LutError, LutResult, MAX_SUPPORTED_INPUTS, MIN_SUPPORTED_INPUTS};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// A binary boolean operator.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum OpType {
    /// Logical AND, written `*`.
    And,
    /// Logical OR, written `+`.
    Or,
    /// Exclusive OR, written `@`.
    Xor,
}

impl OpType {
    /// The infix symbol of this operator.
    pub fn symbol(self) -> char {
        match self {
            OpType::And => '*',
            OpType::Or => '+',
            OpType::Xor => '@',
        }
    }

    /// Looks up the operator written as `symbol`.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '*' => Some(OpType::And),
            '+' => Some(OpType::Or),
            '@' => Some(OpType::Xor),
            _ => None,
        }
    }

    /// Applies the operator to two boolean operands.
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            OpType::And => left & right,
            OpType::Or => left | right,
            OpType::Xor => left ^ right,
        }
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A reference to LUT input pin `A{index}`, optionally inverted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct LutInput {
    /// The pin index, normally 1 through 6.
    pub index: u32,
    /// Whether the pin value is complemented.
    pub inverted: bool,
}

impl LutInput {
    /// Reads this input from the assignment `row`, in which bit `k` holds the
    /// value of `A{k+1}`.
    pub fn evaluate(&self, row: u32) -> bool {
        let set = match self.index.checked_sub(1) {
            Some(bit) if bit < u32::BITS => (row >> bit) & 1 != 0,
            _ => false,
        };
        set != self.inverted
    }
}

/// A binary operation node owning both operands.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BinaryOperation {
    /// The operator.
    pub op: OpType,
    /// The left operand.
    pub left: Box<Expression>,
    /// The right operand.
    pub right: Box<Expression>,
}

/// A LUT equation tree.
///
/// Cloning produces a fully independent tree. Equality and hashing are
/// purely structural: `(A1*A2)` and `(A2*A1)` are different equations.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Expression {
    /// A constant output.
    Constant(bool),
    /// A single LUT input.
    Input(LutInput),
    /// A binary operation.
    Binary(BinaryOperation),
}

impl Expression {
    /// The constant-0 equation.
    pub const ZERO: Expression = Expression::Constant(false);
    /// The constant-1 equation.
    pub const ONE: Expression = Expression::Constant(true);

    /// Creates the non-inverted input `A{index}`.
    pub fn input(index: u32) -> Self {
        Expression::Input(LutInput {
            index,
            inverted: false,
        })
    }

    /// Creates the inverted input `~A{index}`.
    pub fn inverted_input(index: u32) -> Self {
        Expression::Input(LutInput {
            index,
            inverted: true,
        })
    }

    /// Creates a binary operation node.
    pub fn binary(op: OpType, left: Expression, right: Expression) -> Self {
        Expression::Binary(BinaryOperation {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Creates `(left*right)`.
    pub fn and(left: Expression, right: Expression) -> Self {
        Self::binary(OpType::And, left, right)
    }

    /// Creates `(left+right)`.
    pub fn or(left: Expression, right: Expression) -> Self {
        Self::binary(OpType::Or, left, right)
    }

    /// Creates `(left@right)`.
    pub fn xor(left: Expression, right: Expression) -> Self {
        Self::binary(OpType::Xor, left, right)
    }

    /// Returns the value of a constant node, or `None` for any other node.
    ///
    /// This is a structural check: `(A1+~A1)` is not a constant node.
    pub fn as_constant(&self) -> Option<bool> {
        match self {
            Expression::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Replaces every input index found in `mapping` with its mapped value.
    ///
    /// Indices missing from `mapping` are left alone, so partial and
    /// identity mappings are both fine.
    pub fn remap_pins(&mut self, mapping: &BTreeMap<u32, u32>) {
        match self {
            Expression::Constant(_) => {}
            Expression::Input(input) => {
                if let Some(&index) = mapping.get(&input.index) {
                    input.index = index;
                }
            }
            Expression::Binary(op) => {
                op.left.remap_pins(mapping);
                op.right.remap_pins(mapping);
            }
        }
    }

    /// Returns every input index referenced anywhere in the tree.
    ///
    /// This is syntactic: `(A6+~A6)` uses A6 even though its value never
    /// matters.
    pub fn used_inputs(&self) -> BTreeSet<u32> {
        let mut used = BTreeSet::new();
        self.collect_inputs(&mut used);
        used
    }

    fn collect_inputs(&self, used: &mut BTreeSet<u32>) {
        match self {
            Expression::Constant(_) => {}
            Expression::Input(input) => {
                used.insert(input.index);
            }
            Expression::Binary(op) => {
                op.left.collect_inputs(used);
                op.right.collect_inputs(used);
            }
        }
    }

    /// Returns the highest input index referenced, or `None` if the tree
    /// contains only constants.
    pub fn max_input(&self) -> Option<u32> {
        self.used_inputs().last().copied()
    }

    /// Checks that every referenced input is one of `A1`..`A6`.
    pub fn check_inputs(&self) -> LutResult<()> {
        match self
            .used_inputs()
            .into_iter()
            .find(|i| !(MIN_SUPPORTED_INPUTS..=MAX_SUPPORTED_INPUTS).contains(i))
        {
            Some(index) => Err(LutError::InputIndex { index }),
            None => Ok(()),
        }
    }

    /// Evaluates the equation for the assignment `row`, in which bit `k`
    /// holds the value of `A{k+1}`.
    pub fn evaluate(&self, row: u32) -> bool {
        match self {
            Expression::Constant(value) => *value,
            Expression::Input(input) => input.evaluate(row),
            Expression::Binary(op) => op.op.apply(op.left.evaluate(row), op.right.evaluate(row)),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(false) => write!(f, "0"),
            Expression::Constant(true) => write!(f, "1"),
            Expression::Input(input) => {
                if input.inverted {
                    write!(f, "~")?;
                }
                write!(f, "A{}", input.index)
            }
            Expression::Binary(op) => write!(f, "({}{}{})", op.left, op.op, op.right),
        }
    }
}

impl FromStr for Expression {
    type Err = LutError;

    fn from_str(s: &str) -> LutResult<Self> {
        crate::parser::parse_equation(s).map_err(LutError::from)
    }
}

impl From<LutInput> for Expression {
    fn from(input: LutInput) -> Self {
        Expression::Input(input)
    }
}

/// Incremental constructor for binary operations whose parts arrive
/// separately, e.g. while rebuilding a tree from an external netlist.
///
/// [`build`](BinaryOpBuilder::build) reports any part that was never set.
#[derive(Clone, Debug, Default)]
pub struct BinaryOpBuilder {
    op: Option<OpType>,
    left: Option<Expression>,
    right: Option<Expression>,
}

impl BinaryOpBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operator.
    pub fn op(mut self, op: OpType) -> Self {
        self.op = Some(op);
        self
    }

    /// Sets the left operand.
    pub fn left(mut self, left: Expression) -> Self {
        self.left = Some(left);
        self
    }

    /// Sets the right operand.
    pub fn right(mut self, right: Expression) -> Self {
        self.right = Some(right);
        self
    }

    /// Builds the operation, failing if the operator or an operand is absent.
    pub fn build(self) -> LutResult<Expression> {
        let op = self.op.ok_or_else(|| LutError::missing("op"))?;
        let left = self.left.ok_or_else(|| LutError::missing("left"))?;
        let right = self.right.ok_or_else(|| LutError::missing("right"))?;
        Ok(Expression::binary(op, left, right))
    }
}
