//! Staff repository.

use allot_core::entities::StaffMember;
use allot_core::enums::Collection;
use allot_core::ids::PREFIX_STAFF;

use crate::AllotDb;
use crate::batch::BatchOp;
use crate::documents::DocRef;
use crate::error::DatabaseError;
use crate::helpers::{from_document, to_body};

impl AllotDb {
    /// All staff members in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the read fails or a document is malformed.
    pub async fn list_staff(&self) -> Result<Vec<StaffMember>, DatabaseError> {
        self.list_entities(Collection::Staff).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the read fails or the document is malformed.
    pub async fn get_staff(&self, id: &str) -> Result<Option<StaffMember>, DatabaseError> {
        self.get_by_id(Collection::Staff, id)
            .await?
            .map(from_document)
            .transpose()
    }

    /// Insert a staff member, generating a document ID when `staff.id` is empty.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the ID is taken or the write fails.
    pub async fn create_staff(&self, mut staff: StaffMember) -> Result<StaffMember, DatabaseError> {
        if staff.id.is_empty() {
            staff.id = self.generate_id(PREFIX_STAFF).await?;
        }
        self.insert(Collection::Staff, &staff.id, &to_body(&staff)?)
            .await?;
        Ok(staff)
    }

    /// Overwrite a stored staff member's fields with `staff`'s.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DocumentNotFound` if the staff member does not
    /// exist.
    pub async fn update_staff(&self, staff: &StaffMember) -> Result<(), DatabaseError> {
        self.set_fields(Collection::Staff, &staff.id, &to_body(staff)?)
            .await
    }

    /// Batch operation writing `staff` under a freshly generated ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if ID generation or encoding fails.
    pub async fn staff_insert_op(&self, staff: &StaffMember) -> Result<BatchOp, DatabaseError> {
        let id = if staff.id.is_empty() {
            self.generate_id(PREFIX_STAFF).await?
        } else {
            staff.id.clone()
        };
        Ok(BatchOp::Set {
            target: DocRef::new(Collection::Staff, id),
            fields: to_body(staff)?,
        })
    }
}
