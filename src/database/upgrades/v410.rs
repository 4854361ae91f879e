//! 4.1: double-slash URLs.

use crate::database::catalog::{StageAction, UpgradeDefinition};

pub const VERSION: &str = "4.1";

pub const UPGRADE: UpgradeDefinition = UpgradeDefinition {
    version: VERSION,
    stages: &[StageAction {
        name: "handle_double_slash_410",
        reason: "Support double-slash URLs",
        statements: &[
            "UPDATE `{prefix}redirection_items` SET match_url=REPLACE(match_url, '//', '/') WHERE url LIKE '%//%' AND regex=0",
        ],
    }],
};
