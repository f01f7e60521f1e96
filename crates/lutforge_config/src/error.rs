//! Error types for configuration loading and validation.

use lutforge_common::LutError;
use std::path::PathBuf;

/// Errors that can occur when loading or validating a `lutforge.toml` file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed into the known sections.
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A LUT setting deserialized but lies outside what the toolkit supports.
    #[error("invalid {field}: {source}")]
    Lut {
        /// Dotted key of the offending setting, e.g. `lut.num_inputs`.
        field: &'static str,
        /// The domain error raised for the value.
        #[source]
        source: LutError,
    },
}

impl ConfigError {
    /// Returns the LUT domain error behind an out-of-range setting.
    pub fn lut_error(&self) -> Option<&LutError> {
        match self {
            ConfigError::Lut { source, .. } => Some(source),
            _ => None,
        }
    }
}
