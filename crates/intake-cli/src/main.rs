use std::process::ExitCode;

use clap::Parser;
use intake_cli::cli::{Cli, Command};
use intake_cli::commands::{run_apply, run_check, run_preview};
use intake_cli::logging::{LogConfig, init_logging};
use intake_core::config::{EngineConfig, load_config};

fn main() -> eyre::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose, cli.json_logs))?;

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };

    match &cli.command {
        Command::Check(args) => {
            let report = run_check(args, &config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if report.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Preview(args) => {
            let view = run_preview(args, &config)?;
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Apply(args) => {
            let report = run_apply(args, &config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
