//! 2.4: IPv6 support and longer titles.

use crate::database::catalog::{StageAction, UpgradeDefinition};

pub const VERSION: &str = "2.4";

pub const UPGRADE: UpgradeDefinition = UpgradeDefinition {
    version: VERSION,
    stages: &[
        StageAction {
            name: "convert_int_ip_to_varchar_240",
            reason: "Convert integer IP values to support IPv6",
            statements: &[
                "ALTER TABLE `{prefix}redirection_404` CHANGE COLUMN `ip` `ipaddress` VARCHAR(45) DEFAULT NULL",
                "UPDATE `{prefix}redirection_404` SET ipaddress=INET_NTOA(ip)",
            ],
        },
        StageAction {
            name: "expand_log_ip_column_240",
            reason: "Expand IP size in logs to support IPv6",
            statements: &["ALTER TABLE `{prefix}redirection_logs` CHANGE `ip` `ip` VARCHAR(45) DEFAULT NULL"],
        },
        StageAction {
            name: "convert_title_to_text_240",
            reason: "Expand size of redirect titles",
            statements: &["ALTER TABLE `{prefix}redirection_items` CHANGE `title` `title` text"],
        },
        StageAction {
            name: "add_missing_index_240",
            reason: "Add missing IP index to 404 logs",
            statements: &["ALTER TABLE `{prefix}redirection_404` ADD INDEX `ip` (`ipaddress`)"],
        },
    ],
};
