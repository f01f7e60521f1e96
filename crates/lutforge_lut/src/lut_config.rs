//! LUT cell configuration and its `#MODE:PIN=value` attribute form.
//!
//! ```text
//! #LUT:O6=(A1*~A2)
//! #ROM:O5=0x00FF
//! #LUT:D=1
//! ```

use crate::contents::LutContents;
use lutforge_common::{LutError, LutResult, NumInputs, ParseError, ParseTarget};
use lutforge_table::TruthTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How a LUT site is used.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperatingMode {
    /// Combinational logic.
    Lut,
    /// Distributed RAM.
    Ram,
    /// Read-only memory.
    Rom,
}

impl OperatingMode {
    /// The attribute keyword for this mode.
    pub fn keyword(self) -> &'static str {
        match self {
            OperatingMode::Lut => "LUT",
            OperatingMode::Ram => "RAM",
            OperatingMode::Rom => "ROM",
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for OperatingMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "LUT" => Ok(OperatingMode::Lut),
            "RAM" => Ok(OperatingMode::Ram),
            "ROM" => Ok(OperatingMode::Rom),
            _ => Err(ParseError::new(
                ParseTarget::Attribute,
                s,
                0,
                "expected operating mode LUT, RAM or ROM",
            )),
        }
    }
}

/// The configuration of a LUT cell: its operating mode, the output pin it
/// drives and its logic contents.
///
/// Two configurations are equal when mode and pin match and the contents
/// are functionally equivalent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LutConfig {
    operating_mode: OperatingMode,
    output_pin: Option<String>,
    contents: LutContents,
}

impl LutConfig {
    /// Creates a configuration.
    pub fn new(
        operating_mode: OperatingMode,
        output_pin: Option<String>,
        contents: LutContents,
    ) -> Self {
        Self {
            operating_mode,
            output_pin,
            contents,
        }
    }

    /// Parses a `#MODE:PIN=value` attribute for a LUT with `num_inputs` pins.
    ///
    /// The value is an init string when it starts with `0x` or `0b`, and an
    /// equation (including the constants `0` and `1`) otherwise. Errors
    /// point into `attr`.
    pub fn parse_xdl_attribute(attr: &str, num_inputs: u32) -> LutResult<Self> {
        let width = NumInputs::new(num_inputs)?;
        let err = |offset: usize, reason: &str| ParseError::new(ParseTarget::Attribute, attr, offset, reason);
        let relocate =
            |base: usize, inner: ParseError| ParseError::new(ParseTarget::Attribute, attr, base + inner.offset, inner.reason);

        let body = attr
            .strip_prefix('#')
            .ok_or_else(|| err(0, "expected '#'"))?;
        let (mode_text, rest) = body
            .split_once(':')
            .ok_or_else(|| err(attr.len(), "expected ':' after the operating mode"))?;
        let operating_mode = mode_text
            .parse::<OperatingMode>()
            .map_err(|e| relocate(1, e))?;

        let pin_start = 2 + mode_text.len();
        let (pin, value) = rest
            .split_once('=')
            .ok_or_else(|| err(attr.len(), "expected '=' after the output pin"))?;
        if pin.is_empty() {
            return Err(err(pin_start, "expected an output pin name").into());
        }
        if let Some(bad) = pin.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')) {
            return Err(err(pin_start + bad, "invalid character in output pin name").into());
        }

        let value_start = pin_start + pin.len() + 1;
        let contents = if value.starts_with("0x") || value.starts_with("0b") {
            let table = TruthTable::parse_with(value, width).map_err(|e| match e {
                LutError::Parse(inner) => LutError::Parse(relocate(value_start, inner)),
                other => other,
            })?;
            LutContents::from_table(table, num_inputs)?
        } else {
            let expression =
                lutforge_eqn::parse_equation(value).map_err(|e| relocate(value_start, e))?;
            LutContents::from_expression(expression, num_inputs)?
        };

        debug!(attr, mode = %operating_mode, pin, "parsed LUT attribute");
        Ok(Self::new(operating_mode, Some(pin.to_string()), contents))
    }

    /// Returns the operating mode.
    pub fn operating_mode(&self) -> OperatingMode {
        self.operating_mode
    }

    /// Sets the operating mode.
    pub fn set_operating_mode(&mut self, operating_mode: OperatingMode) {
        self.operating_mode = operating_mode;
    }

    /// Returns the output pin name, e.g. `O6`.
    pub fn output_pin(&self) -> Option<&str> {
        self.output_pin.as_deref()
    }

    /// Sets the output pin name.
    pub fn set_output_pin(&mut self, output_pin: Option<String>) {
        self.output_pin = output_pin;
    }

    /// Returns the logic contents.
    pub fn contents(&self) -> &LutContents {
        &self.contents
    }

    /// Returns the logic contents for modification.
    pub fn contents_mut(&mut self) -> &mut LutContents {
        &mut self.contents
    }

    /// Replaces the logic contents.
    pub fn set_contents(&mut self, contents: LutContents) {
        self.contents = contents;
    }

    /// True if the LUT is in LUT mode and its equation is the constant `1`.
    ///
    /// The check is structural: `(A1+~A1)` is not a VCC source.
    pub fn is_vcc_source(&self) -> bool {
        self.is_constant_source(true)
    }

    /// True if the LUT is in LUT mode and its equation is the constant `0`.
    pub fn is_gnd_source(&self) -> bool {
        self.is_constant_source(false)
    }

    /// True if the LUT is a VCC or GND source.
    pub fn is_static_source(&self) -> bool {
        self.is_vcc_source() || self.is_gnd_source()
    }

    fn is_constant_source(&self, value: bool) -> bool {
        self.operating_mode == OperatingMode::Lut
            && self.contents.expression().as_constant() == Some(value)
    }

    /// Turns the LUT into a constant-1 source in LUT mode.
    pub fn configure_as_vcc_source(&mut self) {
        self.operating_mode = OperatingMode::Lut;
        self.contents.set_constant(true);
    }

    /// Turns the LUT into a constant-0 source in LUT mode.
    pub fn configure_as_gnd_source(&mut self) {
        self.operating_mode = OperatingMode::Lut;
        self.contents.set_constant(false);
    }

    /// Formats the configuration as an attribute value.
    ///
    /// Static sources are written as `1` or `0`, other LUT-mode cells as an
    /// equation, and RAM/ROM cells as an init string.
    pub fn to_xdl_attribute_value(&self) -> String {
        let value = if self.is_vcc_source() {
            "1".to_string()
        } else if self.is_gnd_source() {
            "0".to_string()
        } else if self.operating_mode == OperatingMode::Lut {
            self.contents.expression().to_string()
        } else {
            self.contents.table().to_string()
        };
        format!(
            "#{}:{}={}",
            self.operating_mode,
            self.output_pin.as_deref().unwrap_or_default(),
            value
        )
    }
}

impl fmt::Display for LutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}:{}={}",
            self.operating_mode,
            self.output_pin.as_deref().unwrap_or_default(),
            self.contents
        )
    }
}

/// Builder for [`LutConfig`] when the parts arrive separately.
///
/// [`build`](LutConfigBuilder::build) fails if the operating mode or the
/// contents were never set. The output pin is optional.
#[derive(Clone, Debug, Default)]
pub struct LutConfigBuilder {
    operating_mode: Option<OperatingMode>,
    output_pin: Option<String>,
    contents: Option<LutContents>,
}

impl LutConfigBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operating mode.
    pub fn operating_mode(mut self, operating_mode: OperatingMode) -> Self {
        self.operating_mode = Some(operating_mode);
        self
    }

    /// Sets the output pin name.
    pub fn output_pin(mut self, output_pin: impl Into<String>) -> Self {
        self.output_pin = Some(output_pin.into());
        self
    }

    /// Sets the logic contents.
    pub fn contents(mut self, contents: LutContents) -> Self {
        self.contents = Some(contents);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> LutResult<LutConfig> {
        let operating_mode = self
            .operating_mode
            .ok_or_else(|| LutError::missing("operating_mode"))?;
        let contents = self
            .contents
            .ok_or_else(|| LutError::missing("contents"))?;
        Ok(LutConfig::new(operating_mode, self.output_pin, contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lutforge_eqn::Expression;

    fn zero_contents() -> LutContents {
        LutContents::from_expression(Expression::ZERO, 6).unwrap()
    }

    fn parse(attr: &str) -> LutConfig {
        LutConfig::parse_xdl_attribute(attr, 6).unwrap_or_else(|e| panic!("{e}"))
    }

    fn parse_err(attr: &str) -> ParseError {
        match LutConfig::parse_xdl_attribute(attr, 6) {
            Err(LutError::Parse(e)) => e,
            other => panic!("expected parse error for {attr}, got {other:?}"),
        }
    }

    #[test]
    fn builder_requires_mode_and_contents() {
        assert_eq!(
            LutConfigBuilder::new().contents(zero_contents()).build(),
            Err(LutError::missing("operating_mode"))
        );
        assert_eq!(
            LutConfigBuilder::new()
                .operating_mode(OperatingMode::Lut)
                .build(),
            Err(LutError::missing("contents"))
        );
    }

    #[test]
    fn builder_leaves_pin_unset() {
        let config = LutConfigBuilder::new()
            .operating_mode(OperatingMode::Lut)
            .contents(zero_contents())
            .build()
            .unwrap();
        assert_eq!(config.output_pin(), None);
    }

    #[test]
    fn clone_is_equal_with_independent_contents() {
        let config = LutConfig::new(OperatingMode::Lut, Some("O6".into()), zero_contents());
        let mut copy = config.clone();
        assert_eq!(copy, config);
        copy.contents_mut().update_expression(Expression::ONE).unwrap();
        assert_ne!(copy, config);
        assert!(config.is_gnd_source());
    }

    #[test]
    fn equality_uses_functional_contents() {
        let a = LutConfig::new(OperatingMode::Lut, Some("O6".into()), zero_contents());
        let b = LutConfig::new(
            OperatingMode::Lut,
            Some("O6".into()),
            LutContents::from_equation("A6*~A6", 6).unwrap(),
        );
        assert_eq!(a, b);
        let mut c = b.clone();
        c.set_output_pin(Some("O5".into()));
        assert_ne!(a, c);
        c.set_output_pin(Some("O6".into()));
        c.set_operating_mode(OperatingMode::Rom);
        assert_ne!(a, c);
    }

    #[test]
    fn parse_equation_values() {
        let config = parse("#LUT:O6=A1*A2");
        assert_eq!(config.operating_mode(), OperatingMode::Lut);
        assert_eq!(config.output_pin(), Some("O6"));
        assert_eq!(config.contents().num_inputs(), 6);
        assert_eq!(config.contents().expression().to_string(), "(A1*A2)");
    }

    #[test]
    fn parse_init_string_values() {
        let config = LutConfig::parse_xdl_attribute("#ROM:O5=0x00FF", 4).unwrap();
        assert_eq!(config.operating_mode(), OperatingMode::Rom);
        assert_eq!(config.contents().table(), TruthTable::new(0xFF, 4).unwrap());

        let config = LutConfig::parse_xdl_attribute("#RAM:D=0b0110", 2).unwrap();
        assert_eq!(config.output_pin(), Some("D"));
        assert_eq!(config.contents().table(), TruthTable::new(0x6, 2).unwrap());
    }

    #[test]
    fn parse_static_values() {
        assert!(parse("#LUT:O6=1").is_vcc_source());
        assert!(parse("#LUT:O6=0").is_gnd_source());
        assert!(!parse("#ROM:O6=0").is_static_source());
    }

    #[test]
    fn parse_rejects_bad_width() {
        assert_eq!(
            LutConfig::parse_xdl_attribute("#LUT:O6=1", 7),
            Err(LutError::InputCount { count: 7 })
        );
    }

    #[test]
    fn parse_errors_point_into_attribute() {
        let cases = [
            ("LUT:O6=1", 0),
            ("#LUT", 4),
            ("#FOO:O6=1", 1),
            ("#LUT:O6", 7),
            ("#LUT:=1", 5),
            ("#LUT:O-6=1", 6),
            ("#LUT:O6=A1*", 11),
            ("#LUT:O6=(A1*A7)", 12),
            ("#ROM:O6=0x0G", 11),
        ];
        for (attr, offset) in cases {
            let e = parse_err(attr);
            assert_eq!(e.target, ParseTarget::Attribute, "{attr}");
            assert_eq!(e.input, attr);
            assert_eq!(e.offset, offset, "{attr}: {e}");
        }
    }

    #[test]
    fn parse_rejects_deeply_nested_equation() {
        let depth = 10_000;
        let attr = format!("#LUT:O6={}A1{}", "(".repeat(depth), ")".repeat(depth));
        let e = parse_err(&attr);
        assert_eq!(e.reason, "equation nested too deeply");
        assert_eq!(e.offset, 8 + lutforge_eqn::parser::MAX_NESTING + 1);
    }

    #[test]
    fn static_source_checks_are_structural() {
        let config = parse("#LUT:O6=(A1+~A1)");
        assert!(!config.is_vcc_source());
        assert!(!config.is_static_source());
    }

    #[test]
    fn static_source_from_constant_table() {
        let config = LutConfig::parse_xdl_attribute("#LUT:O6=0xFFFF", 4).unwrap();
        assert!(config.is_vcc_source());
        assert_eq!(config.to_xdl_attribute_value(), "#LUT:O6=1");
    }

    #[test]
    fn configure_as_static_sources() {
        let mut config = LutConfig::new(OperatingMode::Rom, Some("O6".into()), zero_contents());
        assert!(!config.is_gnd_source());

        config.configure_as_vcc_source();
        assert_eq!(config.operating_mode(), OperatingMode::Lut);
        assert!(config.is_vcc_source());
        assert!(!config.is_gnd_source());
        assert_eq!(config.contents().table().value(), u64::MAX);

        config.configure_as_gnd_source();
        assert!(config.is_gnd_source());
        assert!(config.is_static_source());
        assert_eq!(config.contents().table().value(), 0);
    }

    #[test]
    fn attribute_value_by_mode() {
        assert_eq!(
            parse("#LUT:O6=A1*A2").to_xdl_attribute_value(),
            "#LUT:O6=(A1*A2)"
        );
        assert_eq!(
            LutConfig::parse_xdl_attribute("#ROM:O5=A1", 2)
                .unwrap()
                .to_xdl_attribute_value(),
            "#ROM:O5=0xA"
        );
        assert_eq!(parse("#LUT:O6=0").to_xdl_attribute_value(), "#LUT:O6=0");
        let unnamed = LutConfig::new(OperatingMode::Lut, None, zero_contents());
        assert_eq!(unnamed.to_xdl_attribute_value(), "#LUT:=0");
    }

    #[test]
    fn attribute_value_reparses() {
        for attr in ["#LUT:O6=((A6+~A6)*A4)", "#ROM:O5=0x00000000000000F0", "#LUT:D=1"] {
            let config = parse(attr);
            assert_eq!(config.to_xdl_attribute_value(), attr);
            assert_eq!(parse(&config.to_xdl_attribute_value()), config);
        }
    }

    #[test]
    fn display_prints_equation() {
        let config = LutConfig::parse_xdl_attribute("#ROM:O5=0x8", 2).unwrap();
        assert_eq!(config.to_string(), "#ROM:O5=(A2*A1)");
    }

    #[test]
    fn operating_mode_text() {
        for mode in [OperatingMode::Lut, OperatingMode::Ram, OperatingMode::Rom] {
            assert_eq!(mode.to_string().parse::<OperatingMode>().unwrap(), mode);
        }
        assert!("lut".parse::<OperatingMode>().is_err());
        assert_eq!(serde_json::to_string(&OperatingMode::Rom).unwrap(), r#""ROM""#);
    }
}
