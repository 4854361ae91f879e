//! 2.0.1: redirect titles.

use crate::database::catalog::{StageAction, UpgradeDefinition};

pub const VERSION: &str = "2.0.1";

pub const UPGRADE: UpgradeDefinition = UpgradeDefinition {
    version: VERSION,
    stages: &[StageAction {
        name: "add_title_201",
        reason: "Add titles to redirects",
        statements: &["ALTER TABLE `{prefix}redirection_items` ADD `title` varchar(50) NULL"],
    }],
};
