//! Typed repositories over the document store.
//!
//! Each module adds `impl AllotDb` methods for one collection: listing
//! decoded entities, single-document writes, and building [`BatchOp`]s for
//! bulk imports.

pub mod interest;
pub mod quota;
pub mod staff;
pub mod student;

use allot_core::enums::Collection;
use serde::de::DeserializeOwned;

use crate::AllotDb;
use crate::batch::{BatchOp, BatchOutcome};
use crate::documents::DocRef;
use crate::error::DatabaseError;
use crate::helpers::from_document;

impl AllotDb {
    /// Decode every document in a collection as `T`.
    pub(crate) async fn list_entities<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, DatabaseError> {
        self.list_all(collection)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    /// Delete every document in a collection using chunked atomic batches.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only if the collection cannot be read; failed
    /// chunks are reported in the returned [`BatchOutcome`].
    pub async fn delete_collection(
        &self,
        collection: Collection,
        chunk_size: usize,
    ) -> Result<BatchOutcome, DatabaseError> {
        let ops: Vec<BatchOp> = self
            .list_all(collection)
            .await?
            .into_iter()
            .map(|doc| BatchOp::Delete {
                target: DocRef::new(collection, doc.id),
            })
            .collect();
        let outcome = self.commit_chunked(ops, chunk_size).await;
        tracing::info!(
            %collection,
            deleted = outcome.committed_ops,
            failed_batches = outcome.failed_batches,
            "deleted collection"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::test_db;

    #[tokio::test]
    async fn delete_collection_leaves_other_collections() {
        let db = test_db().await;
        for i in 0..7 {
            db.insert(Collection::Students, &format!("stu-{i}"), &json!({}))
                .await
                .unwrap();
        }
        db.insert(Collection::Staff, "stf-1", &json!({})).await.unwrap();

        let outcome = db.delete_collection(Collection::Students, 3).await.unwrap();
        assert_eq!(outcome.committed_ops, 7);
        assert_eq!(outcome.committed_batches, 3);
        assert_eq!(outcome.failed_batches, 0);

        assert!(db.list_all(Collection::Students).await.unwrap().is_empty());
        assert_eq!(db.list_all(Collection::Staff).await.unwrap().len(), 1);
    }
}
