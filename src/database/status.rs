//! Upgrade status state machine.
//!
//! `Status` holds no state of its own beyond the store handle: every call
//! loads the session from the options record, changes it, and writes it
//! back. That makes each call safe to issue from a fresh process, and a run
//! can resume wherever the last invocation left it.
//!
//! Read-modify-write is not atomic. Two drivers working on the same store at
//! the same time can overwrite each other's progress; only one driver is
//! expected to run a given upgrade.
//!
//! States:
//! - not running: no session under [`DB_UPGRADE_STAGE`]
//! - running: a session with an active stage, or drained awaiting `finish`
//! - errored: running with `result = error`; the failed stage stays current
//! - finished: set by `finish`, reported once by `get_json`, then removed

use serde_json::Value;
use tracing::{debug, info, warn};

use super::report::{ReportStatus, StatusReport};
use super::schema::SchemaIntrospector;
use super::session::{Mode, Outcome, UpgradeSession};
use super::upgrader::Upgrader;
use crate::options::{Options, OptionsStore, PersistenceError};
use crate::version;

/// Options key holding the session record.
pub const DB_UPGRADE_STAGE: &str = "database_stage";

/// Options key holding the installed schema version.
pub const DB_VERSION: &str = "database";

type StatusResult<T> = Result<T, PersistenceError>;

pub struct Status<'a, S: OptionsStore + ?Sized> {
    store: &'a S,
    target_version: String,
    manual: bool,
}

impl<'a, S: OptionsStore + ?Sized> Status<'a, S> {
    pub fn new(store: &'a S, target_version: impl Into<String>) -> Self {
        Self {
            store,
            target_version: target_version.into(),
            manual: false,
        }
    }

    /// Mark writes made through this handle as operator-initiated.
    pub fn with_manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }

    pub fn target_version(&self) -> &str {
        &self.target_version
    }

    fn load(&self) -> StatusResult<(Options, UpgradeSession)> {
        let options = self.store.get()?;
        let session = match options.get(DB_UPGRADE_STAGE) {
            Some(value @ Value::Object(_)) => serde_json::from_value(value.clone())?,
            _ => UpgradeSession::default(),
        };
        Ok((options, session))
    }

    fn save(&self, mut options: Options, mut session: UpgradeSession) -> StatusResult<()> {
        if session.is_empty() {
            options.remove(DB_UPGRADE_STAGE);
        } else {
            session.time = chrono::Utc::now().timestamp();
            session.manual = self.manual;
            options.insert(DB_UPGRADE_STAGE.to_string(), serde_json::to_value(&session)?);
        }
        self.store.set(&options)
    }

    /// Snapshot of the persisted session.
    pub fn session(&self) -> StatusResult<UpgradeSession> {
        Ok(self.load()?.1)
    }

    /// Installed schema version; `None` when nothing is installed.
    pub fn current_version(&self) -> StatusResult<Option<String>> {
        let (options, _) = self.load()?;
        Ok(installed_version(&options))
    }

    pub fn needs_installing(&self) -> StatusResult<bool> {
        Ok(self.current_version()?.is_none())
    }

    pub fn needs_updating(&self) -> StatusResult<bool> {
        Ok(self
            .current_version()?
            .map(|v| version::is_older(&v, &self.target_version))
            .unwrap_or(false))
    }

    /// A session exists and has not been finished.
    pub fn is_running(&self) -> StatusResult<bool> {
        let session = self.session()?;
        Ok(session.is_active() && !session.just_finished)
    }

    pub fn start_upgrade(&self, upgraders: &[Upgrader]) -> StatusResult<()> {
        self.start(Mode::Upgrade, upgraders)
    }

    pub fn start_install(&self, upgraders: &[Upgrader]) -> StatusResult<()> {
        self.start(Mode::Install, upgraders)
    }

    /// Replace any existing session with a fresh one over `upgraders`' stages.
    fn start(&self, mode: Mode, upgraders: &[Upgrader]) -> StatusResult<()> {
        let (options, _) = self.load()?;
        let remaining: Vec<String> = upgraders
            .iter()
            .flat_map(|u| u.stage_names())
            .map(str::to_string)
            .collect();

        let target = upgraders.last().map(|u| u.version().to_string());

        info!(?mode, stages = remaining.len(), ?target, "starting session");
        let session = UpgradeSession {
            mode,
            target,
            stage: remaining.first().cloned(),
            remaining_stages: remaining,
            ..Default::default()
        };
        self.save(options, session)
    }

    /// The stage to run next, or `None` when idle or drained.
    pub fn get_current_stage(&self) -> StatusResult<Option<String>> {
        Ok(self.session()?.current_stage().map(str::to_string))
    }

    /// Force the current stage without checking it against the stage list.
    ///
    /// Administrative only; drivers advance with [`Status::set_next_stage`].
    /// Returns `false` when no session is running.
    pub fn set_stage(&self, stage: Option<&str>) -> StatusResult<bool> {
        let (options, mut session) = self.load()?;
        if !session.is_active() {
            debug!(?stage, "ignoring set_stage, not running");
            return Ok(false);
        }

        if let Some(name) = stage.filter(|s| !session.remaining_stages.iter().any(|r| r.as_str() == *s)) {
            warn!(stage = name, "forcing a stage outside the remaining list");
        }
        session.stage = stage.map(str::to_string);
        self.save(options, session)?;
        Ok(true)
    }

    /// Mark the current stage done and move to the one after it.
    ///
    /// Returns `false` (changing nothing) when idle or drained.
    pub fn set_next_stage(&self) -> StatusResult<bool> {
        let (options, mut session) = self.load()?;
        let Some(stage) = session.current_stage().map(str::to_string) else {
            return Ok(false);
        };

        match session.remaining_stages.iter().position(|s| *s == stage) {
            Some(pos) => {
                let done: Vec<String> = session.remaining_stages.drain(..=pos).collect();
                session.completed_stages.extend(done);
            }
            None => {
                if !session.completed_stages.contains(&stage) {
                    session.completed_stages.push(stage.clone());
                }
            }
        }

        session.stage = session.remaining_stages.first().cloned();
        session.debug.clear();
        debug!(completed = %stage, next = ?session.stage, "advanced stage");
        self.save(options, session)?;
        Ok(true)
    }

    pub fn set_ok(&self, reason: &str) -> StatusResult<()> {
        let (options, mut session) = self.load()?;
        session.result = Outcome::Ok;
        session.reason = Some(reason.to_string());
        session.debug.clear();
        self.save(options, session)
    }

    /// Record a failure with a schema snapshot for diagnosis.
    pub fn set_error(&self, reason: &str, schema: &dyn SchemaIntrospector) -> StatusResult<()> {
        let (options, mut session) = self.load()?;
        let stage = session.current_stage().unwrap_or("-").to_string();
        warn!(%stage, reason, "stage failed");

        let mut debug = schema.table_schema();
        debug.push(format!("Stage: {}", stage));

        session.result = Outcome::Error;
        session.reason = Some(reason.to_string());
        session.debug = debug;
        self.save(options, session)
    }

    /// Abort: drop the session whatever state it is in.
    pub fn stop_update(&self) -> StatusResult<()> {
        let (options, session) = self.load()?;
        if session.is_active() {
            info!(stage = ?session.stage, "stopping session");
        }
        self.save(options, UpgradeSession::default())
    }

    /// Complete a running session and stamp the version it reached.
    ///
    /// That is the version of the last definition the session was started
    /// with, or the configured target for a session started with none.
    /// The next [`Status::get_json`] reports `finish-install`/`finish-update`
    /// once and then removes the session. Returns `false` when not running.
    pub fn finish(&self) -> StatusResult<bool> {
        let (mut options, mut session) = self.load()?;
        if !session.is_active() || session.just_finished {
            return Ok(false);
        }

        let reached = session
            .target
            .clone()
            .unwrap_or_else(|| self.target_version.clone());
        info!(mode = ?session.mode, version = %reached, "session finished");
        options.insert(DB_VERSION.to_string(), Value::String(reached));
        session.stage = None;
        session.completed_stages.clear();
        session.remaining_stages.clear();
        session.debug.clear();
        session.just_finished = true;
        self.save(options, session)?;
        Ok(true)
    }

    /// Build the status report. `reason`, when given, replaces the stored one.
    ///
    /// Consumes the one-shot finish marker, so this writes to the store
    /// right after a `finish`.
    pub fn get_json(&self, reason: Option<&str>) -> StatusResult<StatusReport> {
        let (options, session) = self.load()?;
        let installed = installed_version(&options);
        let reason = reason.map(str::to_string).or_else(|| session.reason.clone());

        if session.just_finished {
            let status = match session.mode {
                Mode::Install => ReportStatus::FinishInstall,
                _ => ReportStatus::FinishUpdate,
            };
            let report = StatusReport {
                complete: Some(100.0),
                reason,
                time: Some(session.time),
                manual: Some(session.manual),
                ..StatusReport::new(status, false)
            };
            debug!(%status, "finish reported, clearing session");
            self.save(options, UpgradeSession::default())?;
            return Ok(report);
        }

        let status = match session.mode {
            Mode::Install => ReportStatus::NeedInstall,
            Mode::Upgrade => ReportStatus::NeedUpdate,
            Mode::None => match installed.as_deref() {
                None => ReportStatus::NeedInstall,
                Some(v) if version::is_older(v, &self.target_version) => ReportStatus::NeedUpdate,
                Some(_) => ReportStatus::Ok,
            },
        };

        let in_progress = session.in_progress();
        let mut report = StatusReport::new(status, in_progress);

        if matches!(status, ReportStatus::NeedInstall | ReportStatus::NeedUpdate) {
            report.current = Some(installed.unwrap_or_else(|| "-".to_string()));
            report.next = Some(self.target_version.clone());
        }

        if in_progress || session.is_error() {
            report.complete = Some(session.progress());
        }

        if in_progress || session.result != Outcome::None {
            report.result = Some(if session.is_error() {
                Outcome::Error
            } else {
                Outcome::Ok
            });
            report.reason = reason;
        }

        if session.is_error() {
            report.debug = Some(session.debug.clone());
        }

        if !session.is_empty() {
            report.time = Some(session.time);
            report.manual = Some(session.manual);
        }

        Ok(report)
    }
}

fn installed_version(options: &Options) -> Option<String> {
    match options.get(DB_VERSION) {
        Some(Value::String(v)) if !v.trim().is_empty() => Some(v.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
