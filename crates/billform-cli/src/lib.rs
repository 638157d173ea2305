//! billform CLI Library
//!
//! Command-line interface for checking billing addresses against the
//! checkout form rules and replaying form scenarios.

#![warn(missing_docs)]
#![allow(clippy::format_push_string)]

mod commands;
mod config;
mod error;
mod output;
pub mod handlers;

pub use commands::{CheckArgs, Cli, ColorArg, Commands, LimitsArgs, ScenarioArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{
    limit_rows, render_evaluation, render_limits, render_scenarios, EvaluationReport,
    FieldReport, LimitRow, OutputFormat, Reporter,
};
