//! billform CLI: check billing addresses against the checkout form rules
//!
//! ## Usage
//!
//! ```bash
//! billform check address.yaml                 # Per-field verdicts
//! billform check - --format json < addr.json  # Read stdin, emit JSON
//! billform limits --rules rules.yaml          # Show the active table
//! billform scenario --builtin                 # Replay acceptance flows
//! ```

use billform_cli::{handlers, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);
    console::set_colors_enabled(config.color.should_color());

    match cli.command {
        Commands::Check(args) => handlers::execute_check(&config, &args),
        Commands::Limits(args) => handlers::execute_limits(&config, &args),
        Commands::Scenario(args) => handlers::execute_scenario(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_rules_path(cli.rules.as_deref())
}

/// `RUST_LOG` wins over the -v/-q flags when set
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
