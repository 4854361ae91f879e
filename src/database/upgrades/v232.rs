//! 2.3.2: the modules table is gone.

use crate::database::catalog::{StageAction, UpgradeDefinition};

pub const VERSION: &str = "2.3.2";

pub const UPGRADE: UpgradeDefinition = UpgradeDefinition {
    version: VERSION,
    stages: &[StageAction {
        name: "remove_modules_232",
        reason: "Remove unused modules",
        statements: &["DROP TABLE IF EXISTS `{prefix}redirection_modules`"],
    }],
};
