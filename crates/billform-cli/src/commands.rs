//! CLI command definitions using clap

use crate::config::ColorChoice;
use crate::output::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// billform: check billing addresses against checkout form rules
#[derive(Parser, Debug)]
#[command(name = "billform")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Field rule overrides (YAML or JSON)
    #[arg(long, env = "BILLFORM_RULES", global = true)]
    pub rules: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate an address file and report per-field verdicts
    Check(CheckArgs),

    /// Show the active field length limits
    Limits(LimitsArgs),

    /// Run checkout form scenarios
    Scenario(ScenarioArgs),
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Address file (.json or YAML); `-` reads from stdin
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Exit with failure when submit is disabled
    #[arg(long)]
    pub require_enabled: bool,

    /// Account profile to prefill from; the input then only overrides
    /// the fields it names
    #[arg(long, value_name = "PROFILE")]
    pub prefill: Option<PathBuf>,
}

/// Arguments for the limits command
#[derive(Parser, Debug)]
pub struct LimitsArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the scenario command
#[derive(Parser, Debug)]
pub struct ScenarioArgs {
    /// Scenario files to run
    pub files: Vec<PathBuf>,

    /// Also run the built-in acceptance scenarios
    #[arg(long)]
    pub builtin: bool,

    /// Stop each scenario at its first failed step
    #[arg(long)]
    pub fail_fast: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Detect terminal
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
