//! Stage executors.
//!
//! - `DryRunExecutor` logs the rendered statements and succeeds
//! - `CommandExecutor` pipes the statements into an external SQL client
//!   (e.g. `mysql wordpress`) and treats a non-zero exit as failure

use std::io::Write;
use std::process::{Command, Stdio};

use super::catalog::StageAction;
use super::upgrader::StageExecutor;

/// Logs statements without touching a database.
#[derive(Debug, Clone, Default)]
pub struct DryRunExecutor {
    prefix: String,
}

impl DryRunExecutor {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl StageExecutor for DryRunExecutor {
    fn execute(&self, stage: &StageAction) -> Result<(), String> {
        for sql in stage.render(&self.prefix) {
            tracing::info!(stage = stage.name, "dry run: {}", sql);
        }
        Ok(())
    }
}

/// Runs each stage by feeding its SQL to a client process on stdin.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    program: String,
    args: Vec<String>,
    prefix: String,
}

impl CommandExecutor {
    /// Build from a command line such as `["mysql", "-u", "root", "wordpress"]`.
    ///
    /// Returns `None` for an empty command.
    pub fn from_command(command: &[String], prefix: impl Into<String>) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            prefix: prefix.into(),
        })
    }

    /// The script sent to the client: one statement per line, `;`-terminated.
    pub fn script(&self, stage: &StageAction) -> String {
        let mut script = String::new();
        for sql in stage.render(&self.prefix) {
            script.push_str(sql.trim_end().trim_end_matches(';'));
            script.push_str(";\n");
        }
        script
    }
}

impl StageExecutor for CommandExecutor {
    fn execute(&self, stage: &StageAction) -> Result<(), String> {
        let script = self.script(stage);
        tracing::debug!(stage = stage.name, program = %self.program, "piping stage SQL");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("Failed to run {}: {}", self.program, e))?;

        // A client that exits early breaks the pipe; it still gets reaped below
        let sent = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(script.as_bytes()),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|e| format!("Failed to wait for {}: {}", self.program, e))?;

        if output.status.success() {
            return sent.map_err(|e| format!("Failed to send SQL to {}: {}", self.program, e));
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.is_empty() {
            Err(format!(
                "{} exited with code {}",
                self.program,
                output.status.code().unwrap_or(-1)
            ))
        } else {
            Err(stderr)
        }
    }
}
