//! Effective settings: `lutforge.toml` values with command-line overrides.

use std::error::Error;
use std::path::Path;

use lutforge_common::NumInputs;
use lutforge_config::{load_config, load_config_file, OutputFormat, Radix, ToolConfig, CONFIG_FILE_NAME};
use tracing::debug;

use crate::{GlobalArgs, InitRadix, ReportFormat};

/// Settings shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// LUT width for parsed values.
    pub num_inputs: NumInputs,
    /// Result format.
    pub format: ReportFormat,
    /// Radix of printed init strings.
    pub radix: InitRadix,
    /// Whether to reduce contents before printing.
    pub auto_reduce: bool,
}

impl Settings {
    /// Loads the configuration and applies the command-line overrides.
    ///
    /// An explicit `--config` file must exist. Without one, `lutforge.toml`
    /// in the current directory is used if present, else the defaults.
    pub fn resolve(global: &GlobalArgs) -> Result<Self, Box<dyn Error>> {
        let config = match &global.config {
            Some(path) => load_config_file(Path::new(path))?,
            None => {
                let cwd = std::env::current_dir()?;
                if cwd.join(CONFIG_FILE_NAME).is_file() {
                    load_config(&cwd)?
                } else {
                    ToolConfig::default()
                }
            }
        };
        Self::from_config(&config, global)
    }

    /// Combines a loaded configuration with the command-line overrides.
    pub fn from_config(config: &ToolConfig, global: &GlobalArgs) -> Result<Self, Box<dyn Error>> {
        let num_inputs = NumInputs::new(global.num_inputs.unwrap_or(config.lut.num_inputs))?;
        let format = global.format.unwrap_or(match config.output.format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        });
        let radix = global.radix.unwrap_or(match config.output.radix {
            Radix::Hex => InitRadix::Hex,
            Radix::Binary => InitRadix::Binary,
        });
        let settings = Self {
            num_inputs,
            format,
            radix,
            auto_reduce: config.reduce.auto,
        };
        debug!(?settings, "resolved settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lutforge_config::load_config_from_str;

    fn global() -> GlobalArgs {
        GlobalArgs {
            quiet: false,
            verbose: false,
            config: None,
            num_inputs: None,
            format: None,
            radix: None,
        }
    }

    #[test]
    fn defaults_without_config() {
        let settings = Settings::from_config(&ToolConfig::default(), &global()).unwrap();
        assert_eq!(settings.num_inputs, NumInputs::SIX);
        assert_eq!(settings.format, ReportFormat::Text);
        assert_eq!(settings.radix, InitRadix::Hex);
        assert!(!settings.auto_reduce);
    }

    #[test]
    fn config_values_apply() {
        let config = load_config_from_str(
            "[lut]\nnum_inputs = 3\n[output]\nradix = \"binary\"\nformat = \"json\"\n[reduce]\nauto = true\n",
        )
        .unwrap();
        let settings = Settings::from_config(&config, &global()).unwrap();
        assert_eq!(settings.num_inputs.get(), 3);
        assert_eq!(settings.format, ReportFormat::Json);
        assert_eq!(settings.radix, InitRadix::Binary);
        assert!(settings.auto_reduce);
    }

    #[test]
    fn flags_override_config() {
        let config = load_config_from_str("[lut]\nnum_inputs = 3\n[output]\nformat = \"json\"\n").unwrap();
        let mut args = global();
        args.num_inputs = Some(5);
        args.format = Some(ReportFormat::Text);
        let settings = Settings::from_config(&config, &args).unwrap();
        assert_eq!(settings.num_inputs.get(), 5);
        assert_eq!(settings.format, ReportFormat::Text);
    }

    #[test]
    fn bad_width_flag_errors() {
        let mut args = global();
        args.num_inputs = Some(7);
        let err = Settings::from_config(&ToolConfig::default(), &args).unwrap_err();
        assert!(err.to_string().contains("unsupported number of LUT inputs 7"));
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lut.toml");
        std::fs::write(&path, "[lut]\nnum_inputs = 2\n").unwrap();
        let mut args = global();
        args.config = Some(path.to_string_lossy().into_owned());
        let settings = Settings::resolve(&args).unwrap();
        assert_eq!(settings.num_inputs.get(), 2);
    }

    #[test]
    fn missing_explicit_config_errors() {
        let mut args = global();
        args.config = Some("/nonexistent/lutforge.toml".to_string());
        assert!(Settings::resolve(&args).is_err());
    }
}
