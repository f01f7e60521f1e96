//! Parsing and validation of `lutforge.toml` tool settings.
//!
//! Every section of the file is optional. A missing file is not an error for
//! the command-line front end, which falls back to [`ToolConfig::default`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
