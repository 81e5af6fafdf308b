//! Command-line interface definition.

use crate::logging::LogFormat;
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Args, Command, CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};
use sensorgen_common::{Error, Result};
use sensorgen_config::ConfigOverrides;
use std::ffi::OsString;
use std::path::PathBuf;

/// Generate synthetic factory sensor batches with injected anomalies.
#[derive(Parser, Debug)]
#[command(name = "sensorgen", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Only accepted when no subcommand is given.
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Output format for the command result
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Parse the process arguments, exiting with a usage error on failure.
    pub fn parse_checked() -> Self {
        Self::try_parse_checked(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parse `args` like [`Parser::try_parse_from`], and also reject
    /// top-level generate options given together with a subcommand, which
    /// would otherwise be ignored.
    ///
    /// Values coming from `SENSORGEN_*` variables are not command-line
    /// options and never conflict.
    pub fn try_parse_checked<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cmd = Cli::command();
        let matches = cmd.try_get_matches_from_mut(args)?;

        if let Some(sub) = matches.subcommand_name() {
            let generate_args = GenerateArgs::augment_args(Command::new("generate"));
            let misplaced = generate_args.get_arguments().find(|arg| {
                matches.value_source(arg.get_id().as_str()) == Some(ValueSource::CommandLine)
            });
            if let Some(arg) = misplaced {
                let flag = arg.get_long().unwrap_or(arg.get_id().as_str());
                return Err(cmd.error(
                    ErrorKind::ArgumentConflict,
                    format!("--{flag} cannot be given before the '{sub}' subcommand"),
                ));
            }
        }

        Cli::from_arg_matches(&matches).map_err(|e| e.format(&mut cmd))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the next batch (the default when no subcommand is given)
    Generate(GenerateArgs),
    /// Print the path of the newest batch file
    Latest {
        /// Directory holding batch files
        #[arg(
            long = "output_dir",
            visible_alias = "output-dir",
            env = "SENSORGEN_OUTPUT_DIR",
            default_value = "data",
            value_name = "DIR"
        )]
        output_dir: PathBuf,
    },
}

/// Result output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options for a generation run. Unset options fall back to the config file,
/// then to built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Readings per machine in the new batch [default: 10]
    #[arg(
        long = "records_per_machine",
        visible_alias = "records-per-machine",
        env = "SENSORGEN_RECORDS_PER_MACHINE",
        value_name = "N",
        allow_negative_numbers = true
    )]
    pub records_per_machine: Option<i64>,

    /// Directory for batch files [default: data]
    #[arg(
        long = "output_dir",
        visible_alias = "output-dir",
        env = "SENSORGEN_OUTPUT_DIR",
        value_name = "DIR"
    )]
    pub output_dir: Option<PathBuf>,

    /// Probability of an anomalous reading, 0-1 [default: 0.15]
    #[arg(
        long,
        env = "SENSORGEN_ANOMALIES",
        value_name = "P",
        allow_negative_numbers = true
    )]
    pub anomalies: Option<f64>,

    /// Number of generated machines M001.. [default: 10]
    #[arg(long, value_name = "N")]
    pub machines: Option<usize>,

    /// Seed for reproducible batches
    #[arg(long, env = "SENSORGEN_SEED", value_name = "SEED")]
    pub seed: Option<u64>,

    /// JSON config file
    #[arg(long, env = "SENSORGEN_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Convert to config overrides, rejecting negative counts.
    pub fn overrides(&self) -> Result<ConfigOverrides> {
        let records_per_machine = self
            .records_per_machine
            .map(|n| {
                usize::try_from(n).map_err(|_| Error::InvalidConfig {
                    field: "records_per_machine",
                    reason: format!("must be greater than 0, got {}", n),
                })
            })
            .transpose()?;

        Ok(ConfigOverrides {
            records_per_machine,
            output_dir: self.output_dir.clone(),
            anomaly_probability: self.anomalies,
            machine_count: self.machines,
            seed: self.seed,
        })
    }
}
