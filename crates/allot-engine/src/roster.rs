//! In-memory view of the store loaded at the start of a run.

use std::collections::HashMap;

use allot_core::entities::{InterestRecord, QuotaRecord, StaffMember, Student};
use allot_core::enums::Role;
use allot_db::AllotDb;
use allot_db::error::DatabaseError;

/// Students, staff, quotas, and interests as read at session open.
///
/// Student entries are updated in place by the session's assignment
/// operation so later decisions in the same run see earlier writes.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub(crate) students: Vec<Student>,
    staff: Vec<StaffMember>,
    quotas: HashMap<String, u32>,
    interests: HashMap<String, Vec<String>>,
    default_quota: u32,
}

impl Roster {
    /// # Errors
    ///
    /// Returns `DatabaseError` if any collection cannot be read or decoded.
    pub async fn load(db: &AllotDb, default_quota: u32) -> Result<Self, DatabaseError> {
        let roster = Self::from_parts(
            db.list_students().await?,
            db.list_staff().await?,
            db.list_quotas().await?,
            db.list_interests().await?,
            default_quota,
        );
        tracing::debug!(
            students = roster.students.len(),
            staff = roster.staff.len(),
            quotas = roster.quotas.len(),
            "loaded roster"
        );
        Ok(roster)
    }

    #[must_use]
    pub fn from_parts(
        students: Vec<Student>,
        staff: Vec<StaffMember>,
        quotas: Vec<QuotaRecord>,
        interests: Vec<InterestRecord>,
        default_quota: u32,
    ) -> Self {
        Self {
            students,
            staff,
            quotas: quotas
                .into_iter()
                .map(|record| (record.staff_id, record.quota))
                .collect(),
            interests: interests
                .into_iter()
                .map(|record| (record.staff_id, record.interests))
                .collect(),
            default_quota,
        }
    }

    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    #[must_use]
    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    /// Per-role capacity for a staff member: the quota record if one exists,
    /// else the staff member's own positive quota, else the default.
    #[must_use]
    pub fn quota_of(&self, staff_id: &str) -> u32 {
        if let Some(&quota) = self.quotas.get(staff_id) {
            return quota;
        }
        self.staff_by_id(staff_id)
            .map(|staff| staff.quota)
            .filter(|&quota| quota > 0)
            .unwrap_or(self.default_quota)
    }

    #[must_use]
    pub fn staff_by_id(&self, id: &str) -> Option<&StaffMember> {
        self.staff.iter().find(|staff| staff.id == id)
    }

    /// First staff member whose full name equals `name` exactly.
    #[must_use]
    pub fn staff_by_name(&self, name: &str) -> Option<&StaffMember> {
        self.staff.iter().find(|staff| staff.full_name == name)
    }

    /// Resolve a document ID first, then a full name.
    #[must_use]
    pub fn resolve_staff(&self, key: &str) -> Option<&StaffMember> {
        let key = key.trim();
        self.staff_by_id(key).or_else(|| self.staff_by_name(key))
    }

    #[must_use]
    pub fn interests_of(&self, staff_id: &str) -> &[String] {
        self.interests
            .get(staff_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Position of the student whose `student_id` equals `student_id` exactly.
    #[must_use]
    pub fn position_by_student_id(&self, student_id: &str) -> Option<usize> {
        self.students
            .iter()
            .position(|student| student.student_id == student_id)
    }

    /// Position of a student by document ID first, then by `student_id`.
    #[must_use]
    pub fn resolve_student(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        self.students
            .iter()
            .position(|student| student.id == key)
            .or_else(|| self.position_by_student_id(key))
    }

    /// Number of students with no holder for `role`.
    #[must_use]
    pub fn missing(&self, role: Role) -> usize {
        self.students
            .iter()
            .filter(|student| student.lacks(role))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn staff(id: &str, name: &str, quota: u32) -> StaffMember {
        StaffMember {
            id: id.into(),
            full_name: name.into(),
            email: format!("{id}@example.ac.uk"),
            quota,
            avoid: vec![],
        }
    }

    fn roster() -> Roster {
        Roster::from_parts(
            vec![Student {
                id: "stu-1".into(),
                student_id: "UP1".into(),
                ..Student::default()
            }],
            vec![
                staff("stf-a", "A. Smith", 3),
                staff("stf-b", "B. Jones", 0),
                staff("stf-c", "C. Lee", 8),
            ],
            vec![QuotaRecord {
                staff_id: "stf-c".into(),
                quota: 1,
            }],
            vec![InterestRecord {
                staff_id: "stf-a".into(),
                interests: vec!["CS".into()],
                project_ideas: vec![],
            }],
            5,
        )
    }

    #[test]
    fn quota_precedence() {
        let roster = roster();
        assert_eq!(roster.quota_of("stf-c"), 1, "quota record wins");
        assert_eq!(roster.quota_of("stf-a"), 3, "positive seed used");
        assert_eq!(roster.quota_of("stf-b"), 5, "zero seed falls back to default");
        assert_eq!(roster.quota_of("stf-unknown"), 5);
    }

    #[test]
    fn staff_resolution() {
        let roster = roster();
        assert_eq!(roster.resolve_staff("stf-b").unwrap().full_name, "B. Jones");
        assert_eq!(roster.resolve_staff(" C. Lee ").unwrap().id, "stf-c");
        assert!(roster.staff_by_name("a. smith").is_none());
        assert_eq!(roster.interests_of("stf-a"), ["CS".to_string()]);
        assert!(roster.interests_of("stf-b").is_empty());
    }

    #[test]
    fn student_resolution() {
        let roster = roster();
        assert_eq!(roster.resolve_student("stu-1"), Some(0));
        assert_eq!(roster.resolve_student("UP1"), Some(0));
        assert_eq!(roster.resolve_student("UP2"), None);
        assert_eq!(roster.missing(Role::Supervisor), 1);
    }
}
