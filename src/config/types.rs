//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::version;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub options: OptionsConfig,
    #[serde(default)]
    pub executor: ExecutorConfig,
}

impl Config {
    /// Reject values that would produce broken SQL or an unreachable target.
    pub fn validate(&self) -> Result<(), String> {
        let prefix = &self.database.table_prefix;
        if let Some(c) = prefix
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(format!(
                "database.table_prefix may only contain letters, digits and '_' (found {:?})",
                c
            ));
        }

        if let Some(target) = &self.database.target_version {
            if !version::is_valid(target) {
                return Err(format!(
                    "database.target_version {:?} is not a version number",
                    target
                ));
            }
        }

        if self.options.path.trim().is_empty() {
            return Err("options.path must not be empty".to_string());
        }

        Ok(())
    }
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Replaces `{prefix}` in stage SQL
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
    /// Version to upgrade to; the newest catalog version when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_version: Option<String>,
}

pub fn default_table_prefix() -> String {
    "wp_".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            table_prefix: default_table_prefix(),
            target_version: None,
        }
    }
}

/// Where the options record lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsConfig {
    #[serde(default = "default_options_path")]
    pub path: String,
}

pub fn default_options_path() -> String {
    "~/.local/share/dbup/options.json".to_string()
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            path: default_options_path(),
        }
    }
}

/// How stage SQL is executed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// SQL client command line, fed the statements on stdin.
    /// Empty means dry run.
    #[serde(default)]
    pub command: Vec<String>,
}

impl ExecutorConfig {
    pub fn is_dry_run(&self) -> bool {
        self.command.is_empty()
    }
}
