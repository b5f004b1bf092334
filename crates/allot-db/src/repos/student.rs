//! Student repository.

use allot_core::entities::Student;
use allot_core::enums::{Collection, Role};
use allot_core::ids::PREFIX_STUDENT;
use serde_json::{Map, Value};

use crate::AllotDb;
use crate::batch::BatchOp;
use crate::documents::DocRef;
use crate::error::DatabaseError;
use crate::helpers::{from_document, to_body};

impl AllotDb {
    /// All students in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the read fails or a document is malformed.
    pub async fn list_students(&self) -> Result<Vec<Student>, DatabaseError> {
        self.list_entities(Collection::Students).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the read fails or the document is malformed.
    pub async fn get_student(&self, id: &str) -> Result<Option<Student>, DatabaseError> {
        self.get_by_id(Collection::Students, id)
            .await?
            .map(from_document)
            .transpose()
    }

    /// Insert a student, generating a document ID when `student.id` is empty.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the ID is taken or the write fails.
    pub async fn create_student(&self, mut student: Student) -> Result<Student, DatabaseError> {
        if student.id.is_empty() {
            student.id = self.generate_id(PREFIX_STUDENT).await?;
        }
        self.insert(Collection::Students, &student.id, &to_body(&student)?)
            .await?;
        Ok(student)
    }

    /// Set or clear one role field on a student document.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DocumentNotFound` if the student does not exist.
    pub async fn set_student_role(
        &self,
        id: &str,
        role: Role,
        staff_id: Option<&str>,
    ) -> Result<(), DatabaseError> {
        let mut fields = Map::new();
        fields.insert(
            role.as_str().to_string(),
            staff_id.map_or(Value::Null, |staff| Value::String(staff.to_string())),
        );
        self.set_fields(Collection::Students, id, &Value::Object(fields))
            .await
    }

    /// Overwrite a stored student's fields with `student`'s.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DocumentNotFound` if the student does not exist.
    pub async fn update_student(&self, student: &Student) -> Result<(), DatabaseError> {
        self.set_fields(Collection::Students, &student.id, &to_body(student)?)
            .await
    }

    /// Batch operation writing `student` under a freshly generated ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if ID generation or encoding fails.
    pub async fn student_insert_op(&self, student: &Student) -> Result<BatchOp, DatabaseError> {
        let id = if student.id.is_empty() {
            self.generate_id(PREFIX_STUDENT).await?
        } else {
            student.id.clone()
        };
        Ok(BatchOp::Set {
            target: DocRef::new(Collection::Students, id),
            fields: to_body(student)?,
        })
    }
}
