//! `lutforge decode`, `encode`, `inputs` and `reduce`.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt;

use lutforge_lut::LutContents;
use serde::Serialize;
use tracing::info;

use crate::report::{emit, format_pins, parse_contents, ContentsReport};
use crate::settings::Settings;
use crate::GlobalArgs;

/// Runs `lutforge decode`.
pub fn decode(init: &str, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let settings = Settings::resolve(global)?;
    let contents = LutContents::from_init_string(init, settings.num_inputs.get())?;
    emit(&show(contents, &settings), settings.format)?;
    Ok(0)
}

/// Runs `lutforge encode`.
pub fn encode(equation: &str, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let settings = Settings::resolve(global)?;
    let contents = LutContents::from_equation(equation, settings.num_inputs.get())?;
    emit(&show(contents, &settings), settings.format)?;
    Ok(0)
}

/// Runs `lutforge inputs`.
pub fn inputs(value: &str, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let settings = Settings::resolve(global)?;
    let contents = parse_contents(value, settings.num_inputs)?;
    emit(&InputsReport::new(&contents), settings.format)?;
    Ok(0)
}

/// Runs `lutforge reduce`.
pub fn reduce(value: &str, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let settings = Settings::resolve(global)?;
    let contents = parse_contents(value, settings.num_inputs)?;
    emit(&ReduceReport::new(contents, &settings), settings.format)?;
    Ok(0)
}

/// Applies the automatic reduction setting and captures both forms.
fn show(mut contents: LutContents, settings: &Settings) -> ContentsReport {
    if settings.auto_reduce {
        contents.reduce_to_min_size();
    }
    ContentsReport::new(&contents, settings)
}

/// Used and required inputs of a LUT function.
#[derive(Debug, Serialize)]
struct InputsReport {
    equation: String,
    used: BTreeSet<u32>,
    required: BTreeSet<u32>,
}

impl InputsReport {
    fn new(contents: &LutContents) -> Self {
        Self {
            equation: contents.expression().to_string(),
            used: contents.used_inputs(),
            required: contents.required_inputs(),
        }
    }
}

impl fmt::Display for InputsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "equation: {}", self.equation)?;
        writeln!(f, "used:     {}", format_pins(&self.used))?;
        write!(f, "required: {}", format_pins(&self.required))
    }
}

/// A LUT function before and after input reduction.
#[derive(Debug, Serialize)]
struct ReduceReport {
    before: ContentsReport,
    mapping: BTreeMap<String, String>,
    after: ContentsReport,
}

impl ReduceReport {
    fn new(mut contents: LutContents, settings: &Settings) -> Self {
        let before = ContentsReport::new(&contents, settings);
        let mapping = contents
            .required_inputs()
            .into_iter()
            .zip(1u32..)
            .filter(|(from, to)| from != to)
            .map(|(from, to)| (format!("A{from}"), format!("A{to}")))
            .collect::<BTreeMap<_, _>>();
        contents.reduce_to_min_size();
        let after = ContentsReport::new(&contents, settings);
        info!(before = %before.equation, after = %after.equation, "reduced LUT");
        Self {
            before,
            mapping,
            after,
        }
    }
}

impl fmt::Display for ReduceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "before: {} ({})", self.before.equation, self.before.init)?;
        if self.mapping.is_empty() {
            writeln!(f, "moved:  -")?;
        } else {
            let moves: Vec<String> = self
                .mapping
                .iter()
                .map(|(from, to)| format!("{from}->{to}"))
                .collect();
            writeln!(f, "moved:  {}", moves.join(" "))?;
        }
        write!(f, "after:  {} ({})", self.after.equation, self.after.init)
    }
}
