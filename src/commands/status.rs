//! Status command handler

use anyhow::Result;

use dbup::StatusReport;

use super::Context;

/// Build the status report.
///
/// Reading the report right after a finished upgrade clears the finish
/// marker, so this is not a pure read.
pub fn handle(ctx: &Context) -> Result<StatusReport> {
    Ok(ctx.status(true)?.get_json(None)?)
}
