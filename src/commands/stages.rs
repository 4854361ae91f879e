//! Stages command handler

use anyhow::Result;
use std::fmt::Write as _;

use dbup::database::{Catalog, UpgradeDefinition};

use super::Context;

/// Print catalog stages, optionally only those still pending.
#[cfg(not(tarpaulin_include))]
pub fn handle(ctx: &Context, pending: bool) -> Result<()> {
    let installed = if pending {
        Some(ctx.status(true)?.current_version()?.unwrap_or_default())
    } else {
        None
    };
    let target = ctx.target_version()?;
    print!(
        "{}",
        render(&ctx.catalog, installed.as_deref().map(|i| (i, target)))
    );
    Ok(())
}

/// One line per stage: version, stage name, description.
///
/// With `pending` set to `(installed, target)`, lists only what `upgrade`
/// would run to move `installed` up to `target`; an empty `installed` means
/// nothing is installed.
pub fn render(catalog: &Catalog, pending: Option<(&str, &str)>) -> String {
    let definitions: Vec<UpgradeDefinition> = match pending {
        Some((installed, target)) => catalog.get_upgrades_to(installed, target),
        None => catalog
            .install()
            .copied()
            .into_iter()
            .chain(catalog.get_upgrades().iter().copied())
            .collect(),
    };

    let width = definitions
        .iter()
        .flat_map(|d| d.stages)
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for definition in &definitions {
        let label = if Some(definition) == catalog.install() {
            format!("{} (install)", definition.version)
        } else {
            definition.version.to_string()
        };
        for stage in definition.stages {
            let _ = writeln!(
                out,
                "{:<16} {:<width$}  {}",
                label,
                stage.name,
                stage.reason,
                width = width
            );
        }
    }
    out
}
