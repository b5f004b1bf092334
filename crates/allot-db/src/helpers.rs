//! Document-to-entity conversion helpers.
//!
//! Entities carry their document ID as an `id` field, but stored bodies do
//! not: the ID is the document key. These helpers strip it on the way in and
//! put it back on the way out.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::documents::Document;
use crate::error::DatabaseError;

/// Parse a stored TEXT body as a JSON value.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the text is not valid JSON.
pub fn parse_body(raw: &str) -> Result<Value, DatabaseError> {
    serde_json::from_str(raw)
        .map_err(|e| DatabaseError::Query(format!("Invalid JSON in document body: {e}")))
}

/// Encode an entity as a document body, dropping its `id` field.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the entity does not serialize to
/// a JSON object.
pub fn to_body<T: Serialize>(entity: &T) -> Result<Value, DatabaseError> {
    match serde_json::to_value(entity)? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(Value::Object(map))
        }
        other => Err(DatabaseError::InvalidState(format!(
            "entity encoded as {other}, expected an object"
        ))),
    }
}

/// Decode a document into a typed entity, inserting the document ID as `id`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the body is not an object, or
/// `DatabaseError::Serde` if it does not match the entity's shape.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, DatabaseError> {
    let mut map: Map<String, Value> = match doc.body {
        Value::Object(map) => map,
        other => {
            return Err(DatabaseError::InvalidState(format!(
                "document {} has non-object body {other}",
                doc.id
            )));
        }
    };
    map.insert("id".to_string(), Value::String(doc.id));
    Ok(serde_json::from_value(Value::Object(map))?)
}

#[cfg(test)]
mod tests {
    use allot_core::entities::{StaffMember, Student};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn to_body_strips_id() {
        let staff = StaffMember {
            id: "stf-1".into(),
            full_name: "A. Smith".into(),
            email: "a.smith@example.ac.uk".into(),
            quota: 3,
            avoid: vec![],
        };
        let body = to_body(&staff).unwrap();
        assert_eq!(
            body,
            json!({
                "full_name": "A. Smith",
                "email": "a.smith@example.ac.uk",
                "quota": 3,
                "avoid": []
            })
        );
    }

    #[test]
    fn from_document_restores_id() {
        let doc = Document {
            id: "stu-1".into(),
            body: json!({ "student_id": "UP12345", "supervisor": "stf-1" }),
        };
        let student: Student = from_document(doc).unwrap();
        assert_eq!(student.id, "stu-1");
        assert_eq!(student.supervisor.as_deref(), Some("stf-1"));
    }

    #[test]
    fn from_document_rejects_non_object() {
        let doc = Document {
            id: "stu-1".into(),
            body: json!([1, 2]),
        };
        assert!(from_document::<Student>(doc).is_err());
    }

    #[test]
    fn parse_body_rejects_garbage() {
        assert!(parse_body("{not json").is_err());
    }
}
