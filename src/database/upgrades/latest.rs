//! The latest schema, created from nothing on a fresh install.
//!
//! `TABLES` must always match what a full upgrade chain produces; it doubles
//! as the schema snapshot attached to stage errors.

use crate::database::catalog::{StageAction, UpgradeDefinition};

pub const ITEMS_TABLE: &str = "CREATE TABLE IF NOT EXISTS `{prefix}redirection_items` (
  `id` int(11) unsigned NOT NULL AUTO_INCREMENT,
  `url` mediumtext NOT NULL,
  `match_url` VARCHAR(2000) NULL DEFAULT NULL,
  `match_data` TEXT,
  `regex` INT(11) unsigned NOT NULL DEFAULT '0',
  `position` INT(11) unsigned NOT NULL DEFAULT '0',
  `last_count` INT(10) unsigned NOT NULL DEFAULT '0',
  `last_access` datetime NOT NULL DEFAULT '1970-01-01 00:00:00',
  `group_id` INT(11) NOT NULL DEFAULT '0',
  `status` enum('enabled','disabled') NOT NULL DEFAULT 'enabled',
  `action_type` VARCHAR(20) NOT NULL,
  `action_code` INT(11) unsigned NOT NULL,
  `action_data` MEDIUMTEXT,
  `match_type` VARCHAR(20) NOT NULL,
  `title` TEXT,
  PRIMARY KEY (`id`),
  KEY `url` (`url`(191)),
  KEY `status` (`status`),
  KEY `regex` (`regex`),
  KEY `group_idpos` (`group_id`,`position`),
  KEY `group` (`group_id`),
  KEY `match_url` (`match_url`(191))
)";

pub const GROUPS_TABLE: &str = "CREATE TABLE IF NOT EXISTS `{prefix}redirection_groups` (
  `id` int(11) NOT NULL AUTO_INCREMENT,
  `name` varchar(50) NOT NULL,
  `tracking` int(11) NOT NULL DEFAULT '1',
  `module_id` int(11) unsigned NOT NULL DEFAULT '0',
  `status` enum('enabled','disabled') NOT NULL DEFAULT 'enabled',
  `position` int(11) unsigned NOT NULL DEFAULT '0',
  PRIMARY KEY (`id`),
  KEY `module_id` (`module_id`),
  KEY `status` (`status`)
)";

pub const LOGS_TABLE: &str = "CREATE TABLE IF NOT EXISTS `{prefix}redirection_logs` (
  `id` int(11) unsigned NOT NULL AUTO_INCREMENT,
  `created` datetime NOT NULL,
  `url` MEDIUMTEXT NOT NULL,
  `domain` VARCHAR(255) DEFAULT NULL,
  `sent_to` MEDIUMTEXT,
  `agent` MEDIUMTEXT,
  `referrer` MEDIUMTEXT,
  `http_code` INT(11) unsigned NOT NULL DEFAULT '0',
  `request_method` VARCHAR(10) DEFAULT NULL,
  `request_data` MEDIUMTEXT,
  `redirect_by` VARCHAR(50) DEFAULT NULL,
  `redirection_id` INT(11) unsigned DEFAULT NULL,
  `ip` VARCHAR(45) DEFAULT NULL,
  PRIMARY KEY (`id`),
  KEY `created` (`created`),
  KEY `redirection_id` (`redirection_id`),
  KEY `ip` (`ip`)
)";

pub const NOT_FOUND_TABLE: &str = "CREATE TABLE IF NOT EXISTS `{prefix}redirection_404` (
  `id` int(11) unsigned NOT NULL AUTO_INCREMENT,
  `created` datetime NOT NULL,
  `url` MEDIUMTEXT NOT NULL,
  `domain` VARCHAR(255) DEFAULT NULL,
  `agent` VARCHAR(255) DEFAULT NULL,
  `referrer` VARCHAR(255) DEFAULT NULL,
  `http_code` INT(11) unsigned NOT NULL DEFAULT '0',
  `request_method` VARCHAR(10) DEFAULT NULL,
  `request_data` MEDIUMTEXT,
  `ipaddress` VARCHAR(45) DEFAULT NULL,
  PRIMARY KEY (`id`),
  KEY `created` (`created`),
  KEY `referrer` (`referrer`(191)),
  KEY `ip` (`ipaddress`)
)";

/// Every table of the latest schema, in creation order.
pub const TABLES: &[&str] = &[ITEMS_TABLE, GROUPS_TABLE, LOGS_TABLE, NOT_FOUND_TABLE];

pub const INSTALL: UpgradeDefinition = UpgradeDefinition {
    version: super::LATEST_VERSION,
    stages: &[
        StageAction {
            name: "create_tables",
            reason: "Install Redirection tables",
            statements: TABLES,
        },
        StageAction {
            name: "create_groups",
            reason: "Create basic data",
            statements: &[
                "INSERT INTO `{prefix}redirection_groups` (`name`, `module_id`, `position`) VALUES ('Redirections', 1, 0)",
                "INSERT INTO `{prefix}redirection_groups` (`name`, `module_id`, `position`) VALUES ('Modified Posts', 1, 1)",
            ],
        },
    ],
};
