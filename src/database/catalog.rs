//! Upgrade catalog: the version-ordered list of upgrade definitions.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::error::{UpgradeError, UpgradeResult};
use super::upgrader::Upgrader;
use super::upgrades;
use crate::version;

/// Placeholder replaced with the configured table prefix when a stage runs.
pub const PREFIX_PLACEHOLDER: &str = "{prefix}";

/// One named, atomic unit of a migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageAction {
    pub name: &'static str,
    /// Human description, reported as the `reason` once the stage succeeds.
    pub reason: &'static str,
    /// SQL statements, run in order. Table names use `{prefix}`.
    pub statements: &'static [&'static str],
}

impl StageAction {
    /// Statements with `{prefix}` replaced by `prefix`.
    pub fn render(&self, prefix: &str) -> Vec<String> {
        self.statements
            .iter()
            .map(|sql| sql.replace(PREFIX_PLACEHOLDER, prefix))
            .collect()
    }
}

/// The stages required to reach one schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeDefinition {
    /// Version this definition upgrades *to*.
    pub version: &'static str,
    pub stages: &'static [StageAction],
}

impl UpgradeDefinition {
    pub fn has_stage(&self, name: &str) -> bool {
        self.stages.iter().any(|s| s.name == name)
    }
}

/// Ordered upgrade definitions plus the definition used for fresh installs.
#[derive(Debug, Clone)]
pub struct Catalog {
    upgrades: Vec<UpgradeDefinition>,
    install: Option<UpgradeDefinition>,
}

impl Catalog {
    /// Build a catalog, rejecting unordered or duplicate versions and
    /// stage names used more than once.
    pub fn new(
        upgrades: Vec<UpgradeDefinition>,
        install: Option<UpgradeDefinition>,
    ) -> UpgradeResult<Self> {
        for pair in upgrades.windows(2) {
            if version::compare(pair[0].version, pair[1].version) != Ordering::Less {
                return Err(UpgradeError::InvalidCatalog(format!(
                    "version {} must sort after {}",
                    pair[1].version, pair[0].version
                )));
            }
        }

        let mut seen = HashSet::new();
        for stage in upgrades.iter().chain(install.iter()).flat_map(|u| u.stages) {
            if !seen.insert(stage.name) {
                return Err(UpgradeError::InvalidCatalog(format!(
                    "stage {} is defined more than once",
                    stage.name
                )));
            }
        }

        Ok(Self { upgrades, install })
    }

    /// The catalog compiled into this binary.
    pub fn builtin() -> UpgradeResult<Self> {
        Self::new(upgrades::UPGRADES.to_vec(), Some(upgrades::latest::INSTALL))
    }

    /// All upgrade definitions in catalog order.
    pub fn get_upgrades(&self) -> &[UpgradeDefinition] {
        &self.upgrades
    }

    pub fn install(&self) -> Option<&UpgradeDefinition> {
        self.install.as_ref()
    }

    /// Definitions needed to move past `current`.
    ///
    /// An empty `current` means nothing is installed, which is served by the
    /// install definition alone. Otherwise every definition newer than
    /// `current` (or equal to it when `include_current` is set).
    pub fn get_upgrades_for_version(
        &self,
        current: &str,
        include_current: bool,
    ) -> Vec<UpgradeDefinition> {
        if current.trim().is_empty() {
            return self.install.into_iter().collect();
        }

        self.upgrades
            .iter()
            .filter(|u| match version::compare(u.version, current) {
                Ordering::Greater => true,
                Ordering::Equal => include_current,
                Ordering::Less => false,
            })
            .copied()
            .collect()
    }

    /// Like [`Catalog::get_upgrades_for_version`], but capped at `target`.
    ///
    /// Definitions newer than `target` are left out. The install definition
    /// is never capped: a fresh install always builds the latest schema.
    pub fn get_upgrades_to(&self, current: &str, target: &str) -> Vec<UpgradeDefinition> {
        if current.trim().is_empty() {
            return self.get_upgrades_for_version(current, false);
        }

        self.get_upgrades_for_version(current, false)
            .into_iter()
            .filter(|u| version::compare(u.version, target) != Ordering::Greater)
            .collect()
    }

    /// Definitions to resume from when `stage` is the active stage.
    ///
    /// Starts at whichever definition owns `stage`, regardless of the
    /// installed version. Without a stage this is the same as
    /// [`Catalog::get_upgrades_for_version`].
    pub fn get_upgrades_from_stage(
        &self,
        current: &str,
        stage: Option<&str>,
    ) -> Vec<UpgradeDefinition> {
        let Some(stage) = stage else {
            return self.get_upgrades_for_version(current, false);
        };

        if let Some(install) = self.install.filter(|i| i.has_stage(stage)) {
            return vec![install];
        }

        self.upgrades
            .iter()
            .skip_while(|u| !u.has_stage(stage))
            .copied()
            .collect()
    }

    /// The upgrader owning the named stage.
    pub fn upgrader_for_stage(&self, stage: &str) -> Option<Upgrader> {
        self.upgrades
            .iter()
            .chain(self.install.iter())
            .find(|u| u.has_stage(stage))
            .map(|u| Upgrader::new(*u))
    }

    /// Highest version this catalog can reach.
    pub fn latest_version(&self) -> Option<&'static str> {
        self.upgrades
            .iter()
            .chain(self.install.iter())
            .map(|u| u.version)
            .max_by(|a, b| version::compare(a, b))
    }
}
