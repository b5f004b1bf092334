//! Quota records, keyed by staff document ID.

use allot_core::entities::QuotaRecord;
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
    pub async fn list_quotas(&self) -> Result<Vec<QuotaRecord>, DatabaseError> {
        self.list_entities(Collection::StaffQuotas).await
    }
}

/// Batch operation writing one quota record under its staff ID.
#[must_use]
pub fn quota_set_op(record: &QuotaRecord) -> BatchOp {
    BatchOp::Set {
        target: DocRef::new(Collection::StaffQuotas, record.staff_id.clone()),
        fields: json!({ "staff_id": record.staff_id, "quota": record.quota }),
    }
}
