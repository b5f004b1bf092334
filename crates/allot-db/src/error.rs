//! Database error types for allot-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A single-document update targeted a document that does not exist.
    #[error("Document not found: {collection}/{id}")]
    DocumentNotFound { collection: String, id: String },

    /// A batch exceeded the store's per-commit operation cap.
    #[error("Batch of {len} operations exceeds the limit of {limit}")]
    BatchTooLarge { len: usize, limit: usize },

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Document body could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
