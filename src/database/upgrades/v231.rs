//! 2.3.1: 404 logging moves out of a module and into its own table.

use crate::database::catalog::{StageAction, UpgradeDefinition};

pub const VERSION: &str = "2.3.1";

pub const UPGRADE: UpgradeDefinition = UpgradeDefinition {
    version: VERSION,
    stages: &[
        StageAction {
            name: "remove_404_module_231",
            reason: "Remove 404 module",
            statements: &["UPDATE `{prefix}redirection_groups` SET module_id=1 WHERE module_id=3"],
        },
        StageAction {
            name: "create_404_table_231",
            reason: "Create 404 table",
            statements: &["CREATE TABLE IF NOT EXISTS `{prefix}redirection_404` (
    `id` int(11) unsigned NOT NULL AUTO_INCREMENT,
    `created` datetime NOT NULL,
    `url` varchar(255) NOT NULL DEFAULT '',
    `agent` varchar(255) DEFAULT NULL,
    `referrer` varchar(255) DEFAULT NULL,
    `ip` int(10) unsigned NOT NULL,
    PRIMARY KEY (`id`),
    KEY `created` (`created`),
    KEY `url` (`url`(191)),
    KEY `ip` (`ip`),
    KEY `referrer` (`referrer`(191))
)"],
        },
    ],
};
