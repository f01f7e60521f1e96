//! `lutforge attr`: parse and normalize a LUT configuration attribute.

use std::error::Error;
use std::fmt;

use lutforge_lut::LutConfig;
use serde::Serialize;

use crate::report::{emit, ContentsReport};
use crate::settings::Settings;
use crate::GlobalArgs;

/// Runs the `lutforge attr` command.
pub fn run(attribute: &str, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let settings = Settings::resolve(global)?;
    let mut config = LutConfig::parse_xdl_attribute(attribute, settings.num_inputs.get())?;
    if settings.auto_reduce {
        config.contents_mut().reduce_to_min_size();
    }
    emit(&AttrReport::new(&config, &settings), settings.format)?;
    Ok(0)
}

/// A parsed attribute and its normalized form.
#[derive(Debug, Serialize)]
struct AttrReport {
    attribute: String,
    mode: String,
    output_pin: Option<String>,
    static_source: Option<&'static str>,
    contents: ContentsReport,
}

impl AttrReport {
    fn new(config: &LutConfig, settings: &Settings) -> Self {
        let static_source = if config.is_vcc_source() {
            Some("vcc")
        } else if config.is_gnd_source() {
            Some("gnd")
        } else {
            None
        };
        Self {
            attribute: config.to_xdl_attribute_value(),
            mode: config.operating_mode().to_string(),
            output_pin: config.output_pin().map(str::to_string),
            static_source,
            contents: ContentsReport::new(config.contents(), settings),
        }
    }
}

impl fmt::Display for AttrReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attribute)?;
        if let Some(source) = self.static_source {
            write!(f, "  [{source}]")?;
        }
        Ok(())
    }
}
