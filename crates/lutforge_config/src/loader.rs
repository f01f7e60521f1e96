//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ToolConfig;
use lutforge_common::NumInputs;
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "lutforge.toml";

/// Loads and validates `<dir>/lutforge.toml`.
pub fn load_config(dir: &Path) -> Result<ToolConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ToolConfig, ConfigError> {
    let config: ToolConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks values that deserialize fine but are out of range.
fn validate_config(config: &ToolConfig) -> Result<(), ConfigError> {
    NumInputs::new(config.lut.num_inputs).map_err(|source| ConfigError::Lut {
        field: "lut.num_inputs",
        source,
    })?;
    Ok(())
}
