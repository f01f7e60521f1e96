//! Result printing shared by all commands.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use lutforge_common::{LutResult, NumInputs};
use lutforge_lut::{LutContents, TruthTable};
use serde::Serialize;

use crate::settings::Settings;
use crate::{InitRadix, ReportFormat};

/// Prints `report` to stdout in the selected format.
pub fn emit<R: Serialize + fmt::Display>(report: &R, format: ReportFormat) -> Result<(), Box<dyn Error>> {
    match format {
        ReportFormat::Text => println!("{report}"),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

/// Formats a truth table in the configured radix.
pub fn format_table(table: &TruthTable, radix: InitRadix) -> String {
    match radix {
        InitRadix::Hex => table.to_string(),
        InitRadix::Binary => table.to_binary_string(),
    }
}

/// Parses a command argument as an init string if it has a `0x`/`0b`
/// prefix, and as an equation otherwise.
pub fn parse_contents(value: &str, width: NumInputs) -> LutResult<LutContents> {
    if value.starts_with("0x") || value.starts_with("0b") {
        LutContents::from_init_string(value, width.get())
    } else {
        LutContents::from_equation(value, width.get())
    }
}

/// Formats a pin set as `A1 A3`, or `-` when empty.
pub fn format_pins(pins: &BTreeSet<u32>) -> String {
    if pins.is_empty() {
        return "-".to_string();
    }
    pins.iter()
        .map(|p| format!("A{p}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Both forms of a LUT function.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ContentsReport {
    /// Number of LUT inputs.
    pub num_inputs: u32,
    /// Equation form.
    pub equation: String,
    /// Init string form.
    pub init: String,
}

impl ContentsReport {
    /// Captures both forms of `contents`.
    pub fn new(contents: &LutContents, settings: &Settings) -> Self {
        Self {
            num_inputs: contents.num_inputs(),
            equation: contents.expression().to_string(),
            init: format_table(&contents.table(), settings.radix),
        }
    }
}

impl fmt::Display for ContentsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "equation:   {}", self.equation)?;
        writeln!(f, "init:       {}", self.init)?;
        write!(f, "num_inputs: {}", self.num_inputs)
    }
}
