//! 2.2: group and log indices.

use crate::database::catalog::{StageAction, UpgradeDefinition};

pub const VERSION: &str = "2.2";

pub const UPGRADE: UpgradeDefinition = UpgradeDefinition {
    version: VERSION,
    stages: &[
        StageAction {
            name: "add_group_indices_220",
            reason: "Add group indices to redirects",
            statements: &[
                "ALTER TABLE `{prefix}redirection_items` ADD INDEX `group_idpos` (`group_id`,`position`)",
                "ALTER TABLE `{prefix}redirection_items` ADD INDEX `group` (`group_id`)",
            ],
        },
        StageAction {
            name: "add_log_indices_220",
            reason: "Add indices to logs",
            statements: &[
                "ALTER TABLE `{prefix}redirection_logs` ADD INDEX `created` (`created`)",
                "ALTER TABLE `{prefix}redirection_logs` ADD INDEX `redirection_id` (`redirection_id`)",
                "ALTER TABLE `{prefix}redirection_logs` ADD INDEX `ip` (`ip`)",
                "ALTER TABLE `{prefix}redirection_logs` ADD INDEX `group_id` (`group_id`)",
                "ALTER TABLE `{prefix}redirection_logs` ADD INDEX `module_id` (`module_id`)",
            ],
        },
    ],
};
