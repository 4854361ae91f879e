//! Upgrader: runs single stages of one upgrade definition.

use super::catalog::{StageAction, UpgradeDefinition};
use super::error::{UpgradeError, UpgradeResult};

/// Executes the statements of one stage against the database.
///
/// The error string is the failure message shown to the operator.
pub trait StageExecutor {
    fn execute(&self, stage: &StageAction) -> Result<(), String>;
}

/// Wraps one [`UpgradeDefinition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upgrader {
    definition: UpgradeDefinition,
}

impl Upgrader {
    pub fn new(definition: UpgradeDefinition) -> Self {
        Self { definition }
    }

    /// Wrap every definition, keeping order.
    pub fn for_all(definitions: &[UpgradeDefinition]) -> Vec<Self> {
        definitions.iter().copied().map(Self::new).collect()
    }

    pub fn version(&self) -> &'static str {
        self.definition.version
    }

    pub fn get_stages(&self) -> &'static [StageAction] {
        self.definition.stages
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> {
        self.definition.stages.iter().map(|s| s.name)
    }

    pub fn get_stage(&self, name: &str) -> Option<&'static StageAction> {
        self.definition.stages.iter().find(|s| s.name == name)
    }

    /// Run one named stage through `executor`.
    ///
    /// Returns the stage that ran so the caller can report its reason.
    /// Executor failures come back as [`UpgradeError::StageExecution`]
    /// with the executor's message unchanged.
    pub fn run_stage(
        &self,
        name: &str,
        executor: &dyn StageExecutor,
    ) -> UpgradeResult<&'static StageAction> {
        let stage = self
            .get_stage(name)
            .ok_or_else(|| UpgradeError::UnknownStage(name.to_string()))?;

        tracing::info!(stage = stage.name, version = self.version(), "running stage");
        executor
            .execute(stage)
            .map_err(|message| UpgradeError::StageExecution {
                stage: stage.name.to_string(),
                message,
            })?;

        Ok(stage)
    }
}
