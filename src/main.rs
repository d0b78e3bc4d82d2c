use std::process::ExitCode;

use clap::Parser;
use finplan::commands::base_commands::{CliArgs, Commands};
use finplan::commands::completions_cmd::completions_command;
use finplan::commands::forecast_cmd::forecast_command;
use finplan::commands::goal_cmd::goal_command;
use finplan::commands::take_home_cmd::take_home_command;
use finplan::commands::tax_rate_cmd::tax_rate_command;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "finplan=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let result = match args.command {
        cmd @ Commands::Forecast { .. } => forecast_command(cmd),
        cmd @ Commands::TakeHome { .. } => take_home_command(cmd),
        cmd @ Commands::Goal { .. } => goal_command(cmd),
        cmd @ Commands::TaxRate { .. } => tax_rate_command(cmd),
        cmd @ Commands::Completions { .. } => {
            completions_command(cmd);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
