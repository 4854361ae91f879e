//! dbup - CLI entry point

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands, ConfigCommands};
use commands::Context;
use dbup::UpgradeAction;

/// Environment variable holding the log filter, e.g. `DBUP_LOG=debug`.
const LOG_ENV: &str = "DBUP_LOG";

#[cfg(not(tarpaulin_include))]
fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

/// Logs go to stderr so stdout stays parseable JSON.
#[cfg(not(tarpaulin_include))]
fn init_logging(verbose: u8) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter(verbose).into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

#[cfg(not(tarpaulin_include))]
fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.config.as_deref();

    let (action, all, manual) = match cli.command {
        Commands::Completions { shell } => {
            commands::completions::handle::<Cli>(shell)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Config(ConfigCommands::Show) => {
            commands::config::handle_show(config)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Config(ConfigCommands::Init) => {
            commands::config::handle_init(config)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Stages { pending } => {
            let ctx = Context::load(config, cli.options.as_deref())?;
            commands::stages::handle(&ctx, pending)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Status => {
            let ctx = Context::load(config, cli.options.as_deref())?;
            let report = commands::status::handle(&ctx)?;
            commands::print_report(&report)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Upgrade { all, auto } => (UpgradeAction::Upgrade, all, !auto),
        Commands::Retry { all } => (UpgradeAction::Retry, all, true),
        Commands::Skip => (UpgradeAction::Skip, false, true),
        Commands::Stop => (UpgradeAction::Stop, false, true),
    };

    let ctx = Context::load(config, cli.options.as_deref())?;
    let report = commands::upgrade::handle(&ctx, action, all, manual)?;
    commands::print_report(&report)?;
    Ok(exit_code(report.is_error()))
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
