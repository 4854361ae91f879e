//! Versioned upgrade definitions.
//!
//! Each upgrade lives in its own file (`v201.rs`, `v216.rs`, …) and exposes:
//! - `pub const VERSION: &str`: the schema version this upgrade produces
//! - `pub const UPGRADE: UpgradeDefinition`: its ordered stages
//!
//! To add an upgrade:
//! 1. Create `vNNN.rs` with `VERSION` and `UPGRADE`
//! 2. Add `mod vNNN;` below and append it to `UPGRADES`
//! 3. Bump `LATEST_VERSION` and bring `latest.rs` up to the new schema

pub mod latest;
mod v201;
mod v216;
mod v220;
mod v231;
mod v232;
mod v233;
mod v240;
mod v400;
mod v410;
mod v420;

use super::catalog::UpgradeDefinition;

/// The schema version a fresh install creates.
pub const LATEST_VERSION: &str = v420::VERSION;

/// Upgrade registry, ascending by target version.
/// An upgrade runs when the installed version is older than its target.
#[rustfmt::skip]
pub const UPGRADES: &[UpgradeDefinition] = &[
    v201::UPGRADE,
    v216::UPGRADE,
    v220::UPGRADE,
    v231::UPGRADE,
    v232::UPGRADE,
    v233::UPGRADE,
    v240::UPGRADE,
    v400::UPGRADE,
    v410::UPGRADE,
    v420::UPGRADE,
];
