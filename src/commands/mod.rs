//! Command handlers for the dbup CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod stages;
pub mod status;
pub mod upgrade;

use anyhow::{bail, Context as _, Result};
use std::path::{Path, PathBuf};

use dbup::database::{
    Catalog, CommandExecutor, DryRunExecutor, LatestSchema, StageExecutor, Status, StatusReport,
};
use dbup::{version, Config, JsonFileStore};

/// Everything a command needs: effective config, options store and catalog.
pub struct Context {
    pub config: Config,
    pub store: JsonFileStore,
    pub catalog: Catalog,
}

impl Context {
    /// Load config from `config_path` (or the default location) and open the
    /// options file, `options_path` taking precedence over the config.
    pub fn load(config_path: Option<&Path>, options_path: Option<&Path>) -> Result<Self> {
        let config = load_config(config_path)?;
        let options_path = options_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.options_path());
        let catalog = Catalog::builtin().context("Built-in upgrade catalog is invalid")?;

        tracing::debug!(options = %options_path.display(), "opened options store");
        let ctx = Self {
            config,
            store: JsonFileStore::new(options_path),
            catalog,
        };
        ctx.target_version()?;
        Ok(ctx)
    }

    /// Configured target version, or the newest version in the catalog.
    ///
    /// A configured target newer than the catalog can reach is an error.
    pub fn target_version(&self) -> Result<&str> {
        let latest = self
            .catalog
            .latest_version()
            .context("Upgrade catalog is empty")?;
        let target = self.config.target_version(latest);
        if version::is_older(latest, target) {
            bail!(
                "Invalid config: target_version {} is newer than the latest known version {}",
                target,
                latest
            );
        }
        Ok(target)
    }

    pub fn status(&self, manual: bool) -> Result<Status<'_, JsonFileStore>> {
        Ok(Status::new(&self.store, self.target_version()?).with_manual(manual))
    }

    /// The configured SQL client, or a dry run when none is configured.
    pub fn executor(&self) -> Box<dyn StageExecutor> {
        let prefix = self.config.database.table_prefix.as_str();
        match CommandExecutor::from_command(&self.config.executor.command, prefix) {
            Some(executor) => Box::new(executor),
            None => {
                tracing::info!("no executor command configured, running dry");
                Box::new(DryRunExecutor::new(prefix))
            }
        }
    }

    pub fn schema(&self) -> LatestSchema {
        LatestSchema::new(self.config.database.table_prefix.as_str())
    }
}

/// Resolve the config path, falling back to ~/.config/dbup/config.toml.
pub fn config_path(config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load_from(&config_path(path)?)
}

/// Print a report as pretty JSON on stdout.
pub fn print_report(report: &StatusReport) -> Result<()> {
    println!("{}", report.to_json().context("Failed to serialize report")?);
    Ok(())
}
