//! The persisted upgrade session record.

use serde::{Deserialize, Serialize};

/// Whether a session installs from scratch or upgrades an existing schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    None,
    Install,
    Upgrade,
}

/// Outcome of the last recorded stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    None,
    Ok,
    Error,
}

/// Session state, round-tripped through the options record on every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpgradeSession {
    pub mode: Mode,
    /// Version the schema reaches once every stage has run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Stage to run next; `None` when idle or drained.
    pub stage: Option<String>,
    pub completed_stages: Vec<String>,
    pub remaining_stages: Vec<String>,
    pub result: Outcome,
    pub reason: Option<String>,
    /// Schema snapshot plus a trailing `Stage: <name>` entry, only on error.
    pub debug: Vec<String>,
    /// The last write was operator-initiated.
    pub manual: bool,
    /// Unix timestamp of the last write.
    pub time: i64,
    /// Set by `finish`, consumed by the next report.
    pub just_finished: bool,
}

impl UpgradeSession {
    /// A session exists (it may be drained or just finished).
    pub fn is_active(&self) -> bool {
        self.mode != Mode::None
    }

    /// The active stage, if a session is running.
    pub fn current_stage(&self) -> Option<&str> {
        if self.is_active() {
            self.stage.as_deref()
        } else {
            None
        }
    }

    /// All stages ran but `finish` has not been called.
    pub fn is_drained(&self) -> bool {
        self.is_active()
            && !self.just_finished
            && self.stage.is_none()
            && self.remaining_stages.is_empty()
            && !self.completed_stages.is_empty()
    }

    /// Work is underway: a stage is active, or stages ran and the session
    /// awaits `finish`. A session started with no stages is not in progress.
    pub fn in_progress(&self) -> bool {
        self.is_active()
            && !self.just_finished
            && (self.stage.is_some() || !self.completed_stages.is_empty())
    }

    pub fn is_error(&self) -> bool {
        self.result == Outcome::Error
    }

    /// Nothing worth persisting: no session and no recorded result.
    pub fn is_empty(&self) -> bool {
        !self.is_active() && self.result == Outcome::None && !self.just_finished
    }

    /// Percentage of stages completed, rounded to one decimal place.
    pub fn progress(&self) -> f64 {
        let done = self.completed_stages.len();
        let total = done + self.remaining_stages.len();
        if done == 0 || total == 0 {
            return 0.0;
        }

        let percent = done as f64 / total as f64 * 100.0;
        ((percent * 10.0).round() / 10.0).clamp(0.0, 100.0)
    }
}
