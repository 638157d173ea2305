//! `billform limits`: show the active rule table

use crate::commands::LimitsArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{limit_rows, render_limits, OutputFormat, Reporter};

/// Execute the limits command
pub fn execute_limits(config: &CliConfig, args: &LimitsArgs) -> CliResult<()> {
    let rules = config.load_rules()?;
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    match args.format {
        OutputFormat::Text => reporter.print(&render_limits(&rules))?,
        OutputFormat::Json => reporter.print_json(&limit_rows(&rules))?,
    }
    Ok(())
}
