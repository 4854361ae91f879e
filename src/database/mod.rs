//! Staged schema upgrades.
//!
//! - `catalog`: version-ordered upgrade definitions and their stages
//! - `upgrades`: the built-in definitions, one module per version
//! - `upgrader`: runs a single stage through a [`StageExecutor`]
//! - `status`: the persisted session state machine and status report
//! - `driver`: picks and runs the next unit of work

pub mod catalog;
pub mod driver;
pub mod error;
pub mod executor;
pub mod report;
pub mod schema;
pub mod session;
pub mod status;
pub mod upgrader;
pub mod upgrades;

pub use catalog::{Catalog, StageAction, UpgradeDefinition};
pub use driver::{Driver, UpgradeAction};
pub use error::{UpgradeError, UpgradeResult};
pub use executor::{CommandExecutor, DryRunExecutor};
pub use report::{ReportStatus, StatusReport};
pub use schema::{LatestSchema, SchemaIntrospector};
pub use session::{Mode, Outcome, UpgradeSession};
pub use status::{Status, DB_UPGRADE_STAGE, DB_VERSION};
pub use upgrader::{StageExecutor, Upgrader};
