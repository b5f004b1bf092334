//! Collection-level document access: read-all, get, insert, merge-update.

use allot_core::enums::Collection;
use serde_json::Value;

use crate::AllotDb;
use crate::error::DatabaseError;
use crate::helpers::parse_body;

/// Address of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRef {
    pub collection: Collection,
    pub id: String,
}

impl DocRef {
    #[must_use]
    pub fn new(collection: Collection, id: impl Into<String>) -> Self {
        Self {
            collection,
            id: id.into(),
        }
    }
}

/// A stored document: its ID plus the JSON object body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

pub(crate) const UPSERT_SQL: &str = "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)
     ON CONFLICT (collection, id) DO UPDATE
     SET body = json_patch(documents.body, excluded.body), updated_at = datetime('now')";

pub(crate) const DELETE_SQL: &str = "DELETE FROM documents WHERE collection = ?1 AND id = ?2";

impl AllotDb {
    /// Every document in a collection, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a body is not valid JSON.
    pub async fn list_all(&self, collection: Collection) -> Result<Vec<Document>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, body FROM documents WHERE collection = ?1 ORDER BY seq",
                [collection.as_str()],
            )
            .await?;

        let mut docs = Vec::new();
        while let Some(row) = rows.next().await? {
            docs.push(Document {
                id: row.get::<String>(0)?,
                body: parse_body(&row.get::<String>(1)?)?,
            });
        }
        Ok(docs)
    }

    /// One document by ID, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the body is not valid JSON.
    pub async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, body FROM documents WHERE collection = ?1 AND id = ?2",
                [collection.as_str(), id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(Document {
                id: row.get::<String>(0)?,
                body: parse_body(&row.get::<String>(1)?)?,
            })),
            None => Ok(None),
        }
    }

    /// Insert a new document. Fails if the ID is already taken.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on a duplicate ID or a non-object body.
    pub async fn insert(
        &self,
        collection: Collection,
        id: &str,
        body: &Value,
    ) -> Result<(), DatabaseError> {
        let body = serde_json::to_string(body)?;
        self.conn()
            .execute(
                "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)",
                libsql::params![collection.as_str(), id, body],
            )
            .await?;
        Ok(())
    }

    /// Merge `fields` into an existing document (JSON merge-patch: `null`
    /// removes a key).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DocumentNotFound` if no such document exists.
    pub async fn set_fields(
        &self,
        collection: Collection,
        id: &str,
        fields: &Value,
    ) -> Result<(), DatabaseError> {
        let patch = serde_json::to_string(fields)?;
        let changed = self
            .conn()
            .execute(
                "UPDATE documents SET body = json_patch(body, ?3), updated_at = datetime('now')
                 WHERE collection = ?1 AND id = ?2",
                libsql::params![collection.as_str(), id, patch],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::DocumentNotFound {
                collection: collection.as_str().to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Remove one document. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn delete(&self, collection: Collection, id: &str) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(DELETE_SQL, [collection.as_str(), id])
            .await?;
        Ok(changed > 0)
    }
}
