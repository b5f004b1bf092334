//! Interest records, keyed by staff document ID.

use allot_core::entities::InterestRecord;
use allot_core::enums::Collection;
use serde_json::json;

use crate::AllotDb;
use crate::batch::BatchOp;
use crate::documents::DocRef;
use crate::error::DatabaseError;

impl AllotDb {
    /// # Errors
    ///
    /// Returns `DatabaseError` if the read fails or a document is malformed.
    pub async fn list_interests(&self) -> Result<Vec<InterestRecord>, DatabaseError> {
        self.list_entities(Collection::StaffInterests).await
    }
}

/// Batch operation merging one interest record under its staff ID.
///
/// Empty tags and ideas are dropped before writing.
#[must_use]
pub fn interest_set_op(record: &InterestRecord) -> BatchOp {
    let keep = |items: &[String]| -> Vec<String> {
        items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    };
    BatchOp::Set {
        target: DocRef::new(Collection::StaffInterests, record.staff_id.clone()),
        fields: json!({
            "staff_id": record.staff_id,
            "interests": keep(&record.interests),
            "project_ideas": keep(&record.project_ideas),
        }),
    }
}
