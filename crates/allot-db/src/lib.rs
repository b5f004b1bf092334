//! # allot-db
//!
//! libSQL-backed document store for Allot rosters.
//!
//! Every record lives as a JSON object in the `documents` table, addressed by
//! collection name and document ID. The store offers read-all, single-document
//! merge updates, and atomic multi-document batches capped at
//! [`MAX_BATCH_OPS`] operations. Typed repositories for students, staff,
//! quotas, and interests sit on top in [`repos`].

pub mod batch;
pub mod documents;
pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;

pub use batch::{BatchOp, BatchOutcome, MAX_BATCH_OPS, WriteBatch};
pub use documents::{DocRef, Document};

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all roster state.
pub struct AllotDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl AllotDb {
    /// Open a local database at the given path, or `":memory:"` for tests.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let allot_db = Self { db, conn };
        allot_db.run_migrations().await?;
        tracing::debug!(path, "opened document store");
        Ok(allot_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"stu-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::test_db;
    use std::collections::HashSet;

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                ["documents"],
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("stu").await.unwrap();
        assert!(id.starts_with("stu-"), "ID should start with 'stu-': {id}");
        assert_eq!(id.len(), 12, "3 prefix + 1 dash + 8 hex: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in allot_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn open_file_backed_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allot.db");
        let db = super::AllotDb::open_local(&path.to_string_lossy())
            .await
            .unwrap();
        db.generate_id("stf").await.unwrap();
        assert!(path.exists());
    }
}
