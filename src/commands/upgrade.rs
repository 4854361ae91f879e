//! Upgrade, retry, skip and stop handlers

use anyhow::Result;

use dbup::{Driver, StatusReport, UpgradeAction};

use super::Context;

/// Apply `action`, continuing through the remaining stages when `all` is set.
///
/// `manual` marks the writes as operator-initiated.
pub fn handle(ctx: &Context, action: UpgradeAction, all: bool, manual: bool) -> Result<StatusReport> {
    let executor = ctx.executor();
    let schema = ctx.schema();
    let driver = Driver::new(
        &ctx.catalog,
        ctx.status(manual)?,
        executor.as_ref(),
        &schema,
    );

    let report = driver.apply(action)?;
    let keep_going = all
        && matches!(action, UpgradeAction::Upgrade | UpgradeAction::Retry)
        && report.in_progress
        && !report.is_error();

    if keep_going {
        return Ok(driver.run_to_completion()?);
    }
    Ok(report)
}
