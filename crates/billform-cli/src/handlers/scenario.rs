//! `billform scenario`: replay checkout scenarios

use crate::commands::ScenarioArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{render_scenarios, OutputFormat, Reporter};
use billform::scenario::{builtin, Scenario, ScenarioRunner};

/// Gather scenarios from files, then the built-in set if requested
pub fn collect_scenarios(args: &ScenarioArgs) -> CliResult<Vec<Scenario>> {
    let mut scenarios = Vec::with_capacity(args.files.len());
    for path in &args.files {
        scenarios.push(Scenario::load(path)?);
    }
    if args.builtin {
        scenarios.extend(builtin());
    }
    if scenarios.is_empty() {
        return Err(CliError::invalid_argument(
            "no scenarios given; pass scenario files or --builtin",
        ));
    }
    Ok(scenarios)
}

/// Execute the scenario command
pub fn execute_scenario(config: &CliConfig, args: &ScenarioArgs) -> CliResult<()> {
    let scenarios = collect_scenarios(args)?;
    let runner = ScenarioRunner::new()
        .with_rules(config.load_rules()?)
        .with_fail_fast(args.fail_fast);
    let results = runner.run_all(&scenarios)?;

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    match args.format {
        OutputFormat::Text => reporter.print(&render_scenarios(
            &results,
            reporter.use_color,
            config.verbosity.is_verbose(),
        ))?,
        OutputFormat::Json => reporter.print_json(&results)?,
    }

    let failed = results.iter().filter(|r| !r.passed()).count();
    if failed > 0 {
        return Err(CliError::ScenarioFailed {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}
