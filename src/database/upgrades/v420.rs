//! 4.2: richer request logging.

use crate::database::catalog::{StageAction, UpgradeDefinition};

pub const VERSION: &str = "4.2";

pub const UPGRADE: UpgradeDefinition = UpgradeDefinition {
    version: VERSION,
    stages: &[
        StageAction {
            name: "add_extra_logging_420",
            reason: "Add extra logging support",
            statements: &[
                "ALTER TABLE `{prefix}redirection_logs` ADD `domain` VARCHAR(255) NULL DEFAULT NULL AFTER `url`",
                "ALTER TABLE `{prefix}redirection_logs` ADD `http_code` INT(11) unsigned NOT NULL DEFAULT 0 AFTER `referrer`",
                "ALTER TABLE `{prefix}redirection_logs` ADD `request_method` VARCHAR(10) NULL DEFAULT NULL AFTER `http_code`",
                "ALTER TABLE `{prefix}redirection_logs` ADD `redirect_by` VARCHAR(50) NULL DEFAULT NULL AFTER `request_method`",
                "ALTER TABLE `{prefix}redirection_logs` ADD `request_data` MEDIUMTEXT NULL DEFAULT NULL AFTER `request_method`",
            ],
        },
        StageAction {
            name: "remove_module_and_group_420",
            reason: "Remove module and group from logs",
            statements: &[
                "ALTER TABLE `{prefix}redirection_logs` DROP INDEX `module_id`",
                "ALTER TABLE `{prefix}redirection_logs` DROP INDEX `group_id`",
                "ALTER TABLE `{prefix}redirection_logs` DROP `module_id`",
                "ALTER TABLE `{prefix}redirection_logs` DROP `group_id`",
            ],
        },
        StageAction {
            name: "add_extra_404_420",
            reason: "Add extra 404 logging support",
            statements: &[
                "ALTER TABLE `{prefix}redirection_404` ADD `domain` VARCHAR(255) NULL DEFAULT NULL AFTER `url`",
                "ALTER TABLE `{prefix}redirection_404` ADD `http_code` INT(11) unsigned NOT NULL DEFAULT 0 AFTER `referrer`",
                "ALTER TABLE `{prefix}redirection_404` ADD `request_method` VARCHAR(10) NULL DEFAULT NULL AFTER `http_code`",
                "ALTER TABLE `{prefix}redirection_404` ADD `request_data` MEDIUMTEXT NULL DEFAULT NULL AFTER `request_method`",
            ],
        },
    ],
};
