//! 4.0: matched URL column and the new URL format.

use crate::database::catalog::{StageAction, UpgradeDefinition};

pub const VERSION: &str = "4.0";

pub const UPGRADE: UpgradeDefinition = UpgradeDefinition {
    version: VERSION,
    stages: &[
        StageAction {
            name: "add_match_url_400",
            reason: "Add a matched URL column",
            statements: &["ALTER TABLE `{prefix}redirection_items` ADD `match_url` VARCHAR(2000) NULL DEFAULT NULL AFTER `url`"],
        },
        StageAction {
            name: "add_match_url_index",
            reason: "Add match URL index",
            statements: &["ALTER TABLE `{prefix}redirection_items` ADD INDEX `match_url` (`match_url`(191))"],
        },
        StageAction {
            name: "add_redirect_data_400",
            reason: "Add column to store new flags",
            statements: &["ALTER TABLE `{prefix}redirection_items` ADD `match_data` TEXT NULL DEFAULT NULL AFTER `match_url`"],
        },
        StageAction {
            name: "convert_existing_urls_400",
            reason: "Convert existing URLs to new format",
            statements: &[
                "UPDATE `{prefix}redirection_items` SET match_url=LOWER(TRIM(TRAILING '/' FROM url)) WHERE regex=0",
                "UPDATE `{prefix}redirection_items` SET match_url='regex' WHERE regex=1",
            ],
        },
    ],
};
