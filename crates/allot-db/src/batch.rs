//! Atomic multi-document write batches.
//!
//! A [`WriteBatch`] queues merge-sets and deletes and commits them inside one
//! transaction: either every operation lands or none do. A single commit is
//! capped at [`MAX_BATCH_OPS`] operations; [`AllotDb::commit_chunked`] splits
//! larger workloads into sequential batches and reports per-chunk outcomes.

use serde::Serialize;
use serde_json::Value;

use crate::AllotDb;
use crate::documents::{DELETE_SQL, DocRef, UPSERT_SQL};
use crate::error::DatabaseError;

/// Hard cap on operations in one atomic commit.
pub const MAX_BATCH_OPS: usize = 500;

/// One queued write.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOp {
    /// Create the document, or merge `fields` into it if it exists.
    Set { target: DocRef, fields: Value },
    Delete { target: DocRef },
}

/// Queue of writes committed atomically.
#[derive(Debug, Default, Clone)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

/// Result of a chunked commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub committed_ops: usize,
    pub failed_ops: usize,
    pub committed_batches: usize,
    pub failed_batches: usize,
}

impl WriteBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_set(&mut self, target: DocRef, fields: Value) {
        self.ops.push(BatchOp::Set { target, fields });
    }

    pub fn queue_delete(&mut self, target: DocRef) {
        self.ops.push(BatchOp::Delete { target });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl From<Vec<BatchOp>> for WriteBatch {
    fn from(ops: Vec<BatchOp>) -> Self {
        Self { ops }
    }
}

impl AllotDb {
    /// Commit a batch atomically. Returns the number of operations applied.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::BatchTooLarge` if the batch exceeds
    /// [`MAX_BATCH_OPS`], or the first failing statement's error after the
    /// transaction has been rolled back.
    pub async fn commit(&self, batch: WriteBatch) -> Result<usize, DatabaseError> {
        let len = batch.len();
        if len > MAX_BATCH_OPS {
            return Err(DatabaseError::BatchTooLarge {
                len,
                limit: MAX_BATCH_OPS,
            });
        }
        if len == 0 {
            return Ok(0);
        }

        let tx = self.conn().transaction().await?;
        for op in &batch.ops {
            if let Err(e) = apply(&tx, op).await {
                tx.rollback().await?;
                return Err(e);
            }
        }
        tx.commit().await?;
        tracing::debug!(ops = len, "committed write batch");
        Ok(len)
    }

    /// Commit `ops` in sequential batches of at most `chunk_size` operations
    /// (clamped to `1..=MAX_BATCH_OPS`).
    ///
    /// A failing chunk is rolled back as a whole and counted; later chunks are
    /// still attempted.
    pub async fn commit_chunked(&self, ops: Vec<BatchOp>, chunk_size: usize) -> BatchOutcome {
        let chunk_size = chunk_size.clamp(1, MAX_BATCH_OPS);
        let mut outcome = BatchOutcome::default();

        for (index, chunk) in ops.chunks(chunk_size).enumerate() {
            let len = chunk.len();
            match self.commit(WriteBatch::from(chunk.to_vec())).await {
                Ok(_) => {
                    outcome.committed_ops += len;
                    outcome.committed_batches += 1;
                }
                Err(error) => {
                    tracing::warn!(batch = index, ops = len, %error, "write batch failed");
                    outcome.failed_ops += len;
                    outcome.failed_batches += 1;
                }
            }
        }
        outcome
    }
}

async fn apply(conn: &libsql::Connection, op: &BatchOp) -> Result<(), DatabaseError> {
    match op {
        BatchOp::Set { target, fields } => {
            let body = serde_json::to_string(fields)?;
            conn.execute(
                UPSERT_SQL,
                libsql::params![target.collection.as_str(), target.id.as_str(), body],
            )
            .await?;
        }
        BatchOp::Delete { target } => {
            conn.execute(DELETE_SQL, [target.collection.as_str(), target.id.as_str()])
                .await?;
        }
    }
    Ok(())
}
