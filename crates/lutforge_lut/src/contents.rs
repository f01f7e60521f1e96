//! Synchronized truth-table and equation contents of a LUT.

use crate::codec;
use lutforge_common::{LutResult, NumInputs};
use lutforge_eqn::Expression;
use lutforge_table::TruthTable;
use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// The authoritative representation plus a lazily derived copy of the other.
#[derive(Clone, Debug)]
enum Source {
    Table {
        table: TruthTable,
        expression: OnceCell<Expression>,
    },
    Equation {
        expression: Expression,
        table: OnceCell<TruthTable>,
    },
}

/// The logic function programmed into a LUT, kept as a truth table, an
/// equation, or both.
///
/// Whichever form was last written is authoritative. The other one is
/// derived through the [`codec`] on first read and cached until the next
/// update. Readers always get an owned copy, so nothing returned from an
/// accessor can change the contents.
///
/// Equality and hashing are functional: two contents are equal when their
/// truth tables are, however they were written.
#[derive(Clone, Debug)]
pub struct LutContents {
    num_inputs: NumInputs,
    source: Source,
}

impl LutContents {
    /// Creates contents from an equation for a LUT with `num_inputs` pins.
    ///
    /// `num_inputs` counts every pin of the LUT, whether or not the equation
    /// uses it. Fails if `num_inputs` is outside `1..=6` or the equation
    /// references a pin other than `A1`..`A6`.
    pub fn from_expression(expression: Expression, num_inputs: u32) -> LutResult<Self> {
        let num_inputs = NumInputs::new(num_inputs)?;
        expression.check_inputs()?;
        Ok(Self {
            num_inputs,
            source: Source::equation(expression),
        })
    }

    /// Parses equation text and creates contents from it.
    pub fn from_equation(text: &str, num_inputs: u32) -> LutResult<Self> {
        Self::from_expression(text.parse()?, num_inputs)
    }

    /// Creates contents from a truth table, resizing the table to
    /// `num_inputs` pins with the usual grow and shrink rules.
    pub fn from_table(mut table: TruthTable, num_inputs: u32) -> LutResult<Self> {
        let num_inputs = NumInputs::new(num_inputs)?;
        table.resize_to(num_inputs);
        Ok(Self {
            num_inputs,
            source: Source::table(table),
        })
    }

    /// Parses a `0x…`/`0b…` init string at `num_inputs` pins.
    pub fn from_init_string(text: &str, num_inputs: u32) -> LutResult<Self> {
        let num_inputs = NumInputs::new(num_inputs)?;
        let table = TruthTable::parse_with(text, num_inputs)?;
        Ok(Self {
            num_inputs,
            source: Source::table(table),
        })
    }

    /// Returns the number of pins of the LUT.
    pub fn num_inputs(&self) -> u32 {
        self.num_inputs.get()
    }

    /// Returns the equation form, deriving it if necessary.
    pub fn expression(&self) -> Expression {
        match &self.source {
            Source::Equation { expression, .. } => expression.clone(),
            Source::Table { table, expression } => expression
                .get_or_init(|| codec::to_expression(table))
                .clone(),
        }
    }

    /// Returns the truth-table form, deriving it if necessary.
    pub fn table(&self) -> TruthTable {
        match &self.source {
            Source::Table { table, .. } => *table,
            Source::Equation { expression, table } => {
                *table.get_or_init(|| codec::encode(expression, self.num_inputs))
            }
        }
    }

    /// Replaces the contents with `expression` and drops the cached table.
    ///
    /// Fails without changing anything if the equation references a pin
    /// other than `A1`..`A6`.
    pub fn update_expression(&mut self, expression: Expression) -> LutResult<()> {
        expression.check_inputs()?;
        self.source = Source::equation(expression);
        Ok(())
    }

    /// Replaces the contents with the constant equation `0` or `1`.
    pub(crate) fn set_constant(&mut self, value: bool) {
        self.source = Source::equation(Expression::Constant(value));
    }

    /// Replaces the contents with `table`, resized to this LUT's width, and
    /// drops the cached equation.
    pub fn update_table(&mut self, mut table: TruthTable) {
        table.resize_to(self.num_inputs);
        self.source = Source::table(table);
    }

    /// Changes the number of pins of the LUT.
    ///
    /// Added pins become don't-cares. Removing pins keeps the part of the
    /// truth table where they are 0, which may change the function. The
    /// equation is re-derived from the resized table on the next read.
    pub fn update_num_inputs(&mut self, num_inputs: u32) -> LutResult<()> {
        let num_inputs = NumInputs::new(num_inputs)?;
        if num_inputs == self.num_inputs {
            return Ok(());
        }
        let mut table = self.table();
        table.resize_to(num_inputs);
        debug!(
            from = self.num_inputs.get(),
            to = num_inputs.get(),
            table = %table,
            "changed LUT width"
        );
        self.num_inputs = num_inputs;
        self.source = Source::table(table);
        Ok(())
    }

    /// Returns the pins referenced by the equation form.
    ///
    /// A pin can be used without mattering: `((A6+~A6)*A5)` uses `{5, 6}`.
    pub fn used_inputs(&self) -> BTreeSet<u32> {
        match &self.source {
            Source::Equation { expression, .. } => expression.used_inputs(),
            Source::Table { .. } => self.expression().used_inputs(),
        }
    }

    /// Returns the pins whose value can change the output.
    ///
    /// `((A6+~A6)*A5)` requires only `{5}`.
    pub fn required_inputs(&self) -> BTreeSet<u32> {
        self.table().required_inputs()
    }

    /// Drops pins the function does not depend on and renumbers the
    /// remaining ones densely from `A1`, keeping their order.
    ///
    /// `(((A6+~A6)*A5)*(A2+A3))` becomes an equation over `A1`..`A3` with
    /// `A5` mapped to `A3`. The pin count of the LUT is unchanged, so the
    /// resulting table repeats the reduced pattern across the full width.
    /// A constant function reduces to the constant itself.
    pub fn reduce_to_min_size(&mut self) {
        let required = self.required_inputs();
        if required.len() == self.num_inputs.get() as usize {
            return;
        }
        let mapping: BTreeMap<u32, u32> = required.iter().copied().zip(1..).collect();
        let mut reduced = codec::to_expression(&self.table());
        reduced.remap_pins(&mapping);
        debug!(?mapping, equation = %reduced, "reduced LUT inputs");
        self.source = Source::equation(reduced);
    }
}

impl Source {
    fn table(table: TruthTable) -> Self {
        Source::Table {
            table,
            expression: OnceCell::new(),
        }
    }

    fn equation(expression: Expression) -> Self {
        Source::Equation {
            expression,
            table: OnceCell::new(),
        }
    }
}

impl PartialEq for LutContents {
    fn eq(&self, other: &Self) -> bool {
        self.table() == other.table()
    }
}

impl Eq for LutContents {}

impl Hash for LutContents {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.table().hash(state);
    }
}

impl fmt::Display for LutContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression())
    }
}
