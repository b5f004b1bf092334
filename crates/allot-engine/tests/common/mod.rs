#![allow(dead_code)]

use allot_config::EngineConfig;
use allot_core::entities::{InterestRecord, QuotaRecord, StaffMember, Student};
use allot_core::enums::Role;
use allot_db::AllotDb;
use allot_db::repos::interest::interest_set_op;
use allot_db::repos::quota::quota_set_op;

pub const SELF_REPORT_HEADER: &str = "I agree to supervise / moderate this project,Supervisor or Moderator?,Student's ID (without 'UP'),Supervisor's / Moderator's name";

pub const CHOICE_HEADER: &str = "Timestamp,Student ID number (INCLUDING 'UP'),First Supervisor Choice,Second Supervisor Choice,Third Supervisor Choice,Project Topic.";

pub async fn db() -> AllotDb {
    AllotDb::open_local(":memory:").await.unwrap()
}

pub fn config() -> EngineConfig {
    EngineConfig::default()
}

pub async fn add_student(db: &AllotDb, student_id: &str, course: Option<&str>) -> String {
    db.create_student(Student {
        student_id: student_id.into(),
        first_name: "Test".into(),
        surname: student_id.into(),
        course_code: course.map(String::from),
        ..Student::default()
    })
    .await
    .unwrap()
    .id
}

pub async fn add_staff(db: &AllotDb, name: &str, quota: u32) -> String {
    db.create_staff(StaffMember {
        full_name: name.into(),
        email: format!("{}@example.ac.uk", name.to_lowercase().replace([' ', '.'], "")),
        quota,
        ..StaffMember::default()
    })
    .await
    .unwrap()
    .id
}

pub async fn set_quota(db: &AllotDb, staff_id: &str, quota: u32) {
    let outcome = db
        .commit_chunked(
            vec![quota_set_op(&QuotaRecord {
                staff_id: staff_id.into(),
                quota,
            })],
            500,
        )
        .await;
    assert_eq!(outcome.failed_batches, 0);
}

pub async fn set_interests(db: &AllotDb, staff_id: &str, interests: &[&str]) {
    let outcome = db
        .commit_chunked(
            vec![interest_set_op(&InterestRecord {
                staff_id: staff_id.into(),
                interests: interests.iter().map(|s| (*s).to_string()).collect(),
                project_ideas: vec![],
            })],
            500,
        )
        .await;
    assert_eq!(outcome.failed_batches, 0);
}

pub async fn assign(db: &AllotDb, student_doc: &str, role: Role, staff_id: &str) {
    db.set_student_role(student_doc, role, Some(staff_id))
        .await
        .unwrap();
}

pub async fn holder(db: &AllotDb, student_doc: &str, role: Role) -> Option<String> {
    let student = db.get_student(student_doc).await.unwrap().unwrap();
    student.holder(role).map(String::from)
}
