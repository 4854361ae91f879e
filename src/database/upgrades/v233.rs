//! 2.3.3: repair groups left pointing at removed modules.

use crate::database::catalog::{StageAction, UpgradeDefinition};

pub const VERSION: &str = "2.3.3";

pub const UPGRADE: UpgradeDefinition = UpgradeDefinition {
    version: VERSION,
    stages: &[StageAction {
        name: "fix_invalid_groups_233",
        reason: "Migrate any groups with invalid module ID",
        statements: &[
            "UPDATE `{prefix}redirection_groups` SET module_id=1 WHERE module_id > 2",
            "UPDATE `{prefix}redirection_items` SET group_id=(SELECT MIN(id) FROM `{prefix}redirection_groups`) WHERE group_id NOT IN (SELECT id FROM `{prefix}redirection_groups`)",
        ],
    }],
};
