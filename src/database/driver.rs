//! Upgrade driver: decides what the next call should do and does it.
//!
//! Each [`Driver::step`] does at most one stage of work, so a caller that
//! polls (a UI, a cron job) sees progress between stages. A failed stage is
//! recorded on the session instead of being returned as an error; the
//! session stays on that stage until it is retried, skipped or stopped.

use tracing::{debug, info, warn};

use super::catalog::Catalog;
use super::error::{UpgradeError, UpgradeResult};
use super::report::StatusReport;
use super::schema::SchemaIntrospector;
use super::status::Status;
use super::upgrader::{StageExecutor, Upgrader};
use crate::options::OptionsStore;
use crate::version;

/// Operator actions accepted by [`Driver::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeAction {
    /// Start a session if needed, then run the next stage.
    Upgrade,
    /// Re-run the current stage, typically after an error.
    Retry,
    /// Mark the current stage done without running it.
    Skip,
    /// Abandon the session.
    Stop,
}

pub struct Driver<'a, S: OptionsStore + ?Sized> {
    catalog: &'a Catalog,
    status: Status<'a, S>,
    executor: &'a dyn StageExecutor,
    schema: &'a dyn SchemaIntrospector,
}

impl<'a, S: OptionsStore + ?Sized> Driver<'a, S> {
    pub fn new(
        catalog: &'a Catalog,
        status: Status<'a, S>,
        executor: &'a dyn StageExecutor,
        schema: &'a dyn SchemaIntrospector,
    ) -> Self {
        Self {
            catalog,
            status,
            executor,
            schema,
        }
    }

    pub fn status(&self) -> &Status<'a, S> {
        &self.status
    }

    pub fn apply(&self, action: UpgradeAction) -> UpgradeResult<StatusReport> {
        debug!(?action, "applying action");
        match action {
            UpgradeAction::Upgrade | UpgradeAction::Retry => self.step(),
            UpgradeAction::Skip => self.skip(),
            UpgradeAction::Stop => {
                self.status.stop_update()?;
                Ok(self.status.get_json(None)?)
            }
        }
    }

    /// Do one unit of work and report.
    ///
    /// Runs the current stage if there is one and finishes a drained session.
    /// A running session with no current stage resumes at the head of its
    /// remaining stages. Otherwise starts a session when the schema is behind.
    pub fn step(&self) -> UpgradeResult<StatusReport> {
        let session = self.status.session()?;

        if !session.just_finished {
            match session.current_stage() {
                Some(stage) => self.run_stage(stage)?,
                None if session.is_drained() => {
                    self.status.finish()?;
                }
                None if session.is_active() && !session.remaining_stages.is_empty() => {
                    let next = session.remaining_stages[0].as_str();
                    info!(stage = next, "resuming at next remaining stage");
                    self.status.set_stage(Some(next))?;
                    self.run_stage(next)?;
                }
                None => {
                    if self.begin()? {
                        match self.status.get_current_stage()? {
                            Some(stage) => self.run_stage(&stage)?,
                            None => {
                                self.status.finish()?;
                            }
                        }
                    }
                }
            }
        }

        Ok(self.status.get_json(None)?)
    }

    /// Step until the session finishes or a stage fails.
    pub fn run_to_completion(&self) -> UpgradeResult<StatusReport> {
        let mut report = self.step()?;
        while report.in_progress && !report.is_error() {
            report = self.step()?;
        }
        Ok(report)
    }

    /// Start a session for whatever the installed version is missing.
    ///
    /// Returns `false` when there is nothing to do.
    fn begin(&self) -> UpgradeResult<bool> {
        let installed = self.status.current_version()?;
        let target = self.status.target_version();

        match installed {
            None => {
                let upgrades = self.catalog.get_upgrades_to("", target);
                if upgrades.is_empty() {
                    warn!("catalog has no install definition");
                    return Ok(false);
                }
                self.status.start_install(&Upgrader::for_all(&upgrades))?;
            }
            Some(current) => {
                if !version::is_older(&current, target) {
                    return Ok(false);
                }
                let upgrades = self.catalog.get_upgrades_to(&current, target);
                if upgrades.is_empty() {
                    warn!(%current, %target, "no upgrades available");
                    return Ok(false);
                }
                self.status.start_upgrade(&Upgrader::for_all(&upgrades))?;
            }
        }
        Ok(true)
    }

    fn run_stage(&self, stage: &str) -> UpgradeResult<()> {
        let upgrader = self
            .catalog
            .upgrader_for_stage(stage)
            .ok_or_else(|| UpgradeError::UnknownStage(stage.to_string()))?;

        match upgrader.run_stage(stage, self.executor) {
            Ok(action) => {
                info!(stage, "stage complete");
                self.status.set_ok(action.reason)?;
                self.advance()
            }
            Err(UpgradeError::StageExecution { message, .. }) => {
                self.status.set_error(&message, self.schema)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn skip(&self) -> UpgradeResult<StatusReport> {
        if let Some(stage) = self.status.get_current_stage()? {
            info!(%stage, "skipping stage");
            self.status.set_ok(&format!("Skipped stage {}", stage))?;
            self.advance()?;
        }
        Ok(self.status.get_json(None)?)
    }

    fn advance(&self) -> UpgradeResult<()> {
        self.status.set_next_stage()?;
        if self.status.session()?.is_drained() {
            self.status.finish()?;
        }
        Ok(())
    }
}
