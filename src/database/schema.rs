//! Schema introspection for error diagnostics.

use super::catalog::PREFIX_PLACEHOLDER;
use super::upgrades::latest;

/// Describes the current table structure, one entry per table.
pub trait SchemaIntrospector {
    fn table_schema(&self) -> Vec<String>;
}

/// The expected latest schema, rendered with the table prefix.
#[derive(Debug, Clone, Default)]
pub struct LatestSchema {
    prefix: String,
}

impl LatestSchema {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl SchemaIntrospector for LatestSchema {
    fn table_schema(&self) -> Vec<String> {
        latest::TABLES
            .iter()
            .map(|sql| sql.replace(PREFIX_PLACEHOLDER, &self.prefix))
            .collect()
    }
}

impl<F> SchemaIntrospector for F
where
    F: Fn() -> Vec<String>,
{
    fn table_schema(&self) -> Vec<String> {
        self()
    }
}
