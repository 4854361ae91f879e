//! Upgrade engine errors.

use crate::options::PersistenceError;

/// Errors raised by the upgrade engine.
///
/// Stage execution failures are normally recorded on the session rather than
/// returned to the caller; see [`crate::database::Driver`].
#[derive(Debug, thiserror::Error)]
pub enum UpgradeError {
    /// A stage name that no upgrade definition knows about.
    #[error("Unknown upgrade stage: {0}")]
    UnknownStage(String),

    /// The stage executor reported a failure.
    #[error("Stage {stage} failed: {message}")]
    StageExecution { stage: String, message: String },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Catalog definitions are out of order or reuse a version/stage name.
    #[error("Invalid upgrade catalog: {0}")]
    InvalidCatalog(String),
}

pub type UpgradeResult<T> = Result<T, UpgradeError>;
