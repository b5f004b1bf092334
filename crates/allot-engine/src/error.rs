//! Engine error types.
//!
//! These abort an invocation before any row is processed. Per-row problems are
//! never errors; they are tallied as [`RowFailure`]s in the report.
//!
//! [`RowFailure`]: allot_core::responses::RowFailure

use allot_core::enums::{Collection, FailureKind};
use allot_db::error::DatabaseError;
use allot_tabular::TabularError;
use thiserror::Error;

/// Invocation-level failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The roster could not be loaded, or a bulk read failed.
    #[error("Store error: {0}")]
    Database(#[from] DatabaseError),

    /// The import source is not usable.
    #[error("Unparseable import: {0}")]
    Tabular(#[from] TabularError),

    /// A single-record edit named no existing record.
    #[error("No {collection} record matches '{key}'")]
    NotFound { collection: Collection, key: String },

    /// A single-record edit would leave the record unusable or duplicated.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Why one row or student was not allocated. Converted into a `RowFailure`
/// once the caller knows which row and student it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct Rejection {
    pub kind: FailureKind,
    pub reason: String,
}

impl Rejection {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Validation,
            reason: reason.into(),
        }
    }

    pub fn lookup(reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Lookup,
            reason: reason.into(),
        }
    }

    pub fn capacity(reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::CapacityExhausted,
            reason: reason.into(),
        }
    }

    pub fn persistence(reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Persistence,
            reason: reason.into(),
        }
    }
}
