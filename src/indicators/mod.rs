//! Indicator library: stateless functions over a price series plus the
//! registry that exposes them under stable names.

pub mod registry;
pub mod snapshot;

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use registry::*;
pub use snapshot::SnapshotBuilder;

use crate::error::{EngineError, Result};

/// Fails with `InsufficientData` when fewer than `required` bars are present.
pub(crate) fn ensure_history(subject: impl Into<String>, available: usize, required: usize) -> Result<()> {
    if available < required {
        return Err(EngineError::insufficient(subject, required, available));
    }
    Ok(())
}
