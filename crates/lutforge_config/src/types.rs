//! Configuration types deserialized from `lutforge.toml`.

use lutforge_common::MAX_SUPPORTED_INPUTS;
use serde::Deserialize;

/// The complete tool configuration.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ToolConfig {
    /// LUT geometry defaults.
    #[serde(default)]
    pub lut: LutSection,
    /// How results are printed.
    #[serde(default)]
    pub output: OutputSection,
    /// Input reduction settings.
    #[serde(default)]
    pub reduce: ReduceSection,
}

/// The `[lut]` section.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct LutSection {
    /// Default number of LUT inputs when a command does not give one.
    #[serde(default = "default_num_inputs")]
    pub num_inputs: u32,
}

impl Default for LutSection {
    fn default() -> Self {
        Self {
            num_inputs: default_num_inputs(),
        }
    }
}

fn default_num_inputs() -> u32 {
    MAX_SUPPORTED_INPUTS
}

/// The `[output]` section.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct OutputSection {
    /// Radix used when printing init strings.
    #[serde(default)]
    pub radix: Radix,
    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Radix of printed init strings.
#[derive(Debug, Default, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Radix {
    /// `0x…` with one digit per four rows (default).
    #[default]
    Hex,
    /// `0b…` with one digit per row.
    Binary,
}

/// Report format for command output.
#[derive(Debug, Default, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// One JSON object per result.
    Json,
}

/// The `[reduce]` section.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ReduceSection {
    /// Reduce every LUT to its minimal input set before printing.
    #[serde(default)]
    pub auto: bool,
}
