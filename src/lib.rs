//! dbup library
//!
//! A resumable, staged schema-upgrade engine. Upgrades are split into named
//! stages, progress is persisted in an options record after every stage, and
//! any later invocation can pick the run back up.

pub mod config;
pub mod database;
pub mod options;
pub mod version;

pub use config::Config;
pub use database::{Catalog, Driver, Status, StatusReport, UpgradeAction, UpgradeError};
pub use options::{JsonFileStore, MemoryStore, Options, OptionsStore, PersistenceError};
