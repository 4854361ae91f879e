//! Config subcommands handler

use anyhow::{Context as _, Result};
use std::path::Path;

use dbup::Config;

use super::{config_path, load_config};

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    print!("{}", render(&config)?);
    Ok(())
}

/// Write the default configuration unless a config file already exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(path: Option<&Path>) -> Result<()> {
    let path = config_path(path)?;
    if init(&path)? {
        println!("Wrote default config to {}", path.display());
    } else {
        println!("Config already exists at {}", path.display());
    }
    Ok(())
}

pub fn render(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}

/// Returns `false` if `path` already exists.
pub fn init(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    Config::default().save_to(path)?;
    Ok(true)
}
