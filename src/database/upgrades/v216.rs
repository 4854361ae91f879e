//! 2.1.16: first round of indices.

use crate::database::catalog::{StageAction, UpgradeDefinition};

pub const VERSION: &str = "2.1.16";

pub const UPGRADE: UpgradeDefinition = UpgradeDefinition {
    version: VERSION,
    stages: &[
        StageAction {
            name: "add_group_indices_216",
            reason: "Add indices to groups",
            statements: &[
                "ALTER TABLE `{prefix}redirection_groups` ADD INDEX(module_id)",
                "ALTER TABLE `{prefix}redirection_groups` ADD INDEX(status)",
            ],
        },
        StageAction {
            name: "add_redirect_indices_216",
            reason: "Add indices to redirects",
            statements: &[
                "ALTER TABLE `{prefix}redirection_items` ADD INDEX(url(191))",
                "ALTER TABLE `{prefix}redirection_items` ADD INDEX(status)",
                "ALTER TABLE `{prefix}redirection_items` ADD INDEX(regex)",
            ],
        },
    ],
};
