//! Test helper utilities

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway config + options file pair for running the binary.
pub struct TestEnv {
    pub dir: TempDir,
    pub config: PathBuf,
    pub options: PathBuf,
}

impl TestEnv {
    /// Default config (dry run), no options file yet.
    pub fn new() -> Self {
        Self::with_config("")
    }

    pub fn with_config(contents: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = dir.path().join("config.toml");
        let options = dir.path().join("options.json");
        fs::write(&config, contents).expect("Failed to write config");
        Self {
            dir,
            config,
            options,
        }
    }

    /// Config whose executor runs `script` through `sh -c`.
    pub fn with_executor_script(script: &str) -> Self {
        Self::with_config(&format!(
            "[executor]\ncommand = [\"sh\", \"-c\", {:?}]\n",
            script
        ))
    }

    /// `dbup` with `--config` and `--options` pointing into the temp dir.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dbup"));
        cmd.arg("--config")
            .arg(&self.config)
            .arg("--options")
            .arg(&self.options)
            .env("NO_COLOR", "1")
            .env_remove("DBUP_LOG");
        cmd
    }

    pub fn write_options(&self, value: Value) {
        write_json(&self.options, &value);
    }

    pub fn read_options(&self) -> Value {
        read_json(&self.options)
    }

    /// Run with `args` and parse stdout as a report.
    pub fn report(&self, args: &[&str]) -> Value {
        let output = self.cmd().args(args).output().expect("Failed to run dbup");
        serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
            panic!(
                "stdout is not JSON ({}): {}",
                e,
                String::from_utf8_lossy(&output.stdout)
            )
        })
    }
}

pub fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).expect("Failed to write JSON");
}

pub fn read_json(path: &Path) -> Value {
    let contents = fs::read_to_string(path).expect("Failed to read JSON");
    serde_json::from_str(&contents).expect("Invalid JSON")
}
