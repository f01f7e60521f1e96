//! lutforge CLI: inspect and transform FPGA LUT contents.
//!
//! Provides `lutforge decode` and `lutforge encode` for converting between
//! init strings and equations, `lutforge inputs` for used and required input
//! queries, `lutforge reduce` for input minimization, and `lutforge attr` for
//! normalizing `#MODE:PIN=value` LUT attributes.

#![warn(missing_docs)]

mod attr;
mod lut;
mod report;
mod settings;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// lutforge: a LUT truth-table and equation toolkit.
#[derive(Parser, Debug)]
#[command(name = "lutforge", version, about = "FPGA LUT contents toolkit")]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) log output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `lutforge.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Number of LUT inputs (overrides `lut.num_inputs`).
    #[arg(short = 'n', long = "inputs", global = true)]
    pub num_inputs: Option<u32>,

    /// Output format (overrides `output.format`).
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<ReportFormat>,

    /// Radix for printed init strings (overrides `output.radix`).
    #[arg(long, global = true, value_enum)]
    pub radix: Option<InitRadix>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode an init string (`0x…` or `0b…`) into an equation.
    Decode {
        /// The init string.
        init: String,
    },
    /// Encode an equation such as `(A1*~A2)` into an init string.
    Encode {
        /// The equation.
        equation: String,
    },
    /// Show the inputs an init string or equation uses and requires.
    Inputs {
        /// An init string or an equation.
        value: String,
    },
    /// Drop unneeded inputs and renumber the rest from A1.
    Reduce {
        /// An init string or an equation.
        value: String,
    },
    /// Parse and normalize a `#MODE:PIN=value` LUT attribute.
    Attr {
        /// The attribute, e.g. `#LUT:O6=A1*A2`.
        attribute: String,
    },
}

/// Output format for command results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Radix for printed init strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InitRadix {
    /// `0x…`
    Hex,
    /// `0b…`
    Binary,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error log output.
    pub quiet: bool,
    /// Whether to print debug log output.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
    /// LUT width override.
    pub num_inputs: Option<u32>,
    /// Output format override.
    pub format: Option<ReportFormat>,
    /// Init string radix override.
    pub radix: Option<InitRadix>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
        num_inputs: cli.num_inputs,
        format: cli.format,
        radix: cli.radix,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::Decode { ref init } => lut::decode(init, &global),
        Command::Encode { ref equation } => lut::encode(equation, &global),
        Command::Inputs { ref value } => lut::inputs(value, &global),
        Command::Reduce { ref value } => lut::reduce(value, &global),
        Command::Attr { ref attribute } => attr::run(attribute, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `--verbose` selects `debug`,
/// `--quiet` selects `error`, and the default is `warn`.
fn init_logging(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(global)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_log_level(global: &GlobalArgs) -> &'static str {
    if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn global(quiet: bool, verbose: bool) -> GlobalArgs {
        GlobalArgs {
            quiet,
            verbose,
            config: None,
            num_inputs: None,
            format: None,
            radix: None,
        }
    }

    #[test]
    fn parse_decode() {
        let cli = Cli::parse_from(["lutforge", "decode", "0x8"]);
        match cli.command {
            Command::Decode { ref init } => assert_eq!(init, "0x8"),
            _ => panic!("expected Decode command"),
        }
        assert!(cli.num_inputs.is_none());
        assert!(cli.format.is_none());
    }

    #[test]
    fn parse_encode_with_width() {
        let cli = Cli::parse_from(["lutforge", "encode", "A1*A2", "-n", "2"]);
        match cli.command {
            Command::Encode { ref equation } => assert_eq!(equation, "A1*A2"),
            _ => panic!("expected Encode command"),
        }
        assert_eq!(cli.num_inputs, Some(2));
    }

    #[test]
    fn parse_inputs_long_width() {
        let cli = Cli::parse_from(["lutforge", "--inputs", "4", "inputs", "(A1+~A1)"]);
        assert!(matches!(cli.command, Command::Inputs { .. }));
        assert_eq!(cli.num_inputs, Some(4));
    }

    #[test]
    fn parse_reduce_json() {
        let cli = Cli::parse_from(["lutforge", "reduce", "(A2+~A6)", "--format", "json"]);
        assert!(matches!(cli.command, Command::Reduce { .. }));
        assert_eq!(cli.format, Some(ReportFormat::Json));
    }

    #[test]
    fn parse_attr_binary() {
        let cli = Cli::parse_from(["lutforge", "attr", "#ROM:O6=0x0F", "--radix", "binary"]);
        match cli.command {
            Command::Attr { ref attribute } => assert_eq!(attribute, "#ROM:O6=0x0F"),
            _ => panic!("expected Attr command"),
        }
        assert_eq!(cli.radix, Some(InitRadix::Binary));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["lutforge", "--quiet", "--config", "x.toml", "decode", "0x1"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("x.toml"));
    }

    #[test]
    fn parse_verbose_flag() {
        let cli = Cli::parse_from(["lutforge", "-v", "decode", "0x1"]);
        assert!(cli.verbose);
    }

    #[test]
    fn log_levels() {
        assert_eq!(default_log_level(&global(false, false)), "warn");
        assert_eq!(default_log_level(&global(true, false)), "error");
        assert_eq!(default_log_level(&global(false, true)), "debug");
        assert_eq!(default_log_level(&global(true, true)), "debug");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
