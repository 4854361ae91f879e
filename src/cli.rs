//! CLI definitions for dbup
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so command handlers and tests can build the command tree on their own.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: placeholders and valid values (light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "dbup")]
#[command(about = "[ dbup ] - resumable, staged database schema upgrades")]
#[command(
    long_about = "dbup - Resumable, staged database schema upgrades.

Upgrades are split into small named stages. Progress is saved to an
options file after every stage, so an interrupted or failed upgrade can be
resumed, retried or skipped from any later invocation.

Every command that touches the upgrade prints a JSON status report on
stdout. Logs go to stderr (set DBUP_LOG or pass -v/-vv).

QUICK START:
    dbup status                    Show whether an install or upgrade is needed
    dbup upgrade                   Run the next stage
    dbup upgrade --all             Run every remaining stage
    dbup retry                     Re-run a failed stage

Configuration: ~/.config/dbup/config.toml"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Config file to use instead of ~/.config/dbup/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Options file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub options: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the upgrade status report
    #[command(long_about = "Print the upgrade status report as JSON.

The report says whether the database needs installing or upgrading, how
far a running upgrade has got, and the outcome of the last stage.

Right after an upgrade finishes, the first status call reports
finish-install or finish-update; later calls report ok.

EXAMPLE:
    dbup status

OUTPUT:
    {
      \"status\": \"need-update\",
      \"inProgress\": false,
      \"current\": \"2.4\",
      \"next\": \"4.2\"
    }")]
    Status,

    /// Run the next upgrade stage
    #[command(long_about = "Run the next upgrade stage and print the report.

Starts an install or upgrade session if none is running. Without --all
exactly one stage runs per call. A failing stage is recorded in the report
and the session stays on that stage; the exit code is non-zero.

EXAMPLES:
    dbup upgrade                 Run one stage
    dbup upgrade --all           Run until finished or a stage fails
    dbup upgrade --all --auto    Same, recorded as an automatic run")]
    Upgrade {
        /// Keep running stages until finished or a stage fails
        #[arg(long, help = "Run all remaining stages")]
        all: bool,
        /// Record the run as automatic rather than operator-initiated
        #[arg(long, help = "Record as an automatic (non-manual) run")]
        auto: bool,
    },

    /// Re-run the current stage
    #[command(long_about = "Re-run the current stage, usually after it failed.

EXAMPLES:
    dbup retry
    dbup retry --all             Retry, then run the remaining stages")]
    Retry {
        /// Keep running stages after the retried one
        #[arg(long, help = "Continue with the remaining stages")]
        all: bool,
    },

    /// Skip the current stage without running it
    #[command(long_about = "Mark the current stage as done without running it.

Use this when a failed stage was fixed by hand. Skipping the last stage
finishes the session.

EXAMPLE:
    dbup skip")]
    Skip,

    /// Abandon the running upgrade
    #[command(long_about = "Abandon the running session.

Completed stages are not undone. The next upgrade starts over from the
installed version.

EXAMPLE:
    dbup stop")]
    Stop,

    /// List upgrade stages
    #[command(long_about = "List every version and stage known to this build.

With --pending, only the stages the installed version still needs.

EXAMPLES:
    dbup stages
    dbup stages --pending")]
    Stages {
        /// Only stages newer than the installed version
        #[arg(long, help = "Only list stages still to run")]
        pending: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Print a shell completion script.

EXAMPLES:
    dbup completions bash > ~/.local/share/bash-completion/completions/dbup
    dbup completions zsh > ~/.zfunc/_dbup")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

EXAMPLE:
    dbup config show")]
    Show,
    /// Write a default config file if none exists
    #[command(long_about = "Write the default configuration to the config path.

An existing file is left untouched.

EXAMPLE:
    dbup config init")]
    Init,
}
