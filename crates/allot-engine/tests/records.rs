mod common;

use allot_core::entities::{StaffMember, Student};
use allot_core::enums::{Collection, Role};
use allot_core::responses::{DeleteSummary, ImportSummary, StaffRemoval};
use allot_engine::EngineError;
use allot_engine::export::write_export;
use allot_engine::records::{self, StaffEdit, StudentEdit};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn student_import_skips_duplicates_and_blank_ids() {
    let db = common::db().await;
    common::add_student(&db, "UP1", None).await;
    let staff = common::add_staff(&db, "A. Smith", 2).await;

    let rows = allot_tabular::read_students(
        "studentID,First name,Surname,Course code,Supervisor\n\
         UP1,Dup,Licate,CS4001,\n\
         UP2,Ada,Lovelace,CS4001,A. Smith\n\
         UP2,Again,Twice,CS4001,\n\
         ,No,Id,CS4001,\n\
         UP3,Alan,Turing,,Nobody\n"
            .as_bytes(),
    )
    .unwrap();
    let summary = records::import_students(&db, &common::config(), &rows)
        .await
        .unwrap();
    assert_eq!(
        summary,
        ImportSummary {
            written: 2,
            skipped: 3,
            rejected: 0,
            failed_batches: 0,
        }
    );

    let students = records::list_students(&db, Some("lovelace")).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].supervisor.as_deref(), Some(staff.as_str()));
    let turing = records::list_students(&db, Some("UP3")).await.unwrap();
    assert_eq!(turing[0].supervisor, None);
}

#[tokio::test]
async fn staff_import_dedupes_by_email() {
    let db = common::db().await;
    common::add_staff(&db, "A. Smith", 2).await;

    let rows = allot_tabular::read_staff(
        "Full Name,Email,Quota,Avoid\n\
         A. Smith,ASMITH@example.ac.uk,3,\n\
         B. Jones,b.jones@example.ac.uk,4,\"A. Smith\"\n\
         C. Lee,,2,\n"
            .as_bytes(),
    )
    .unwrap();
    let summary = records::import_staff(&db, &common::config(), &rows)
        .await
        .unwrap();
    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped, 2);

    let jones = records::list_staff(&db, Some("jones")).await.unwrap();
    assert_eq!(jones[0].quota, 4);
    assert_eq!(jones[0].avoid, vec!["A. Smith".to_string()]);
}

#[tokio::test]
async fn quota_import_overrides_seed_and_rejects_bad_rows() {
    let db = common::db().await;
    let staff = common::add_staff(&db, "A. Smith", 2).await;
    let config = common::config();

    let rows = allot_tabular::read_quotas(
        "Full Name,Quota\nA. Smith,7\nNobody,3\nA. Smith,many\n".as_bytes(),
    )
    .unwrap();
    let summary = records::import_quotas(&db, &config, &rows).await.unwrap();
    assert_eq!(summary.written, 1);
    assert_eq!(summary.rejected, 2);

    let capacity = records::capacity_summary(&db, &config).await.unwrap();
    assert_eq!(capacity[0].staff_id, staff);
    assert_eq!(capacity[0].quota, 7);
    assert_eq!(capacity[0].remaining_supervisor, 7);
}

#[tokio::test]
async fn interest_import_feeds_default_fill() {
    let db = common::db().await;
    let student = common::add_student(&db, "UP1", Some("EE3001")).await;
    common::add_staff(&db, "A. Smith", 5).await;
    let expert = common::add_staff(&db, "B. Volt", 5).await;

    let rows = allot_tabular::read_interests(
        "Full Name,Interests,Project Ideas\nB. Volt,\"Power systems, EE\",Grid storage\nNobody,CS,\n"
            .as_bytes(),
    )
    .unwrap();
    let summary = records::import_interests(&db, &common::config(), &rows)
        .await
        .unwrap();
    assert_eq!(summary.written, 1);
    assert_eq!(summary.rejected, 1);

    allot_engine::allocate_default(&db, &common::config())
        .await
        .unwrap();
    assert_eq!(common::holder(&db, &student, Role::Supervisor).await, Some(expert));
}

#[tokio::test]
async fn delete_all_students_in_small_batches() {
    let db = common::db().await;
    for i in 0..7 {
        common::add_student(&db, &format!("UP{i}"), None).await;
    }
    common::add_staff(&db, "A. Smith", 1).await;

    let mut config = common::config();
    config.batch_size = 3;
    let summary = records::delete_all(&db, &config, Collection::Students)
        .await
        .unwrap();
    assert_eq!(
        summary,
        DeleteSummary {
            deleted: 7,
            failed_batches: 0
        }
    );
    assert!(records::list_students(&db, None).await.unwrap().is_empty());
    assert_eq!(records::list_staff(&db, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn export_writes_csv_with_unassigned_fallback() {
    let db = common::db().await;
    let student = common::add_student(&db, "UP1", None).await;
    let staff = common::add_staff(&db, "A. Smith", 1).await;
    common::assign(&db, &student, Role::Supervisor, &staff).await;

    let mut out = Vec::new();
    let written = write_export(&db, &common::config(), None, &mut out)
        .await
        .unwrap();
    assert_eq!(written, 1);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "StudentID,StudentName,SupervisorName,SupervisorEmail,ModeratorName,ModeratorEmail\n\
         UP1,\"UP1, Test\",A. Smith,asmith@example.ac.uk,Unassigned,Unassigned\n"
    );

    let mut out = Vec::new();
    write_export(&db, &common::config(), Some(Role::Moderator), &mut out)
        .await
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "StudentID,ModeratorName\nUP1,Unassigned\n");
}

#[tokio::test]
async fn student_add_edit_delete() {
    let db = common::db().await;
    let config = common::config();
    common::add_student(&db, "UP1", None).await;

    let added = records::add_student(
        &db,
        &config,
        Student {
            student_id: " UP2 ".into(),
            first_name: "Ada".into(),
            surname: "Lovelace".into(),
            course_code: Some(String::new()),
            supervisor: Some("stf-sneaky".into()),
            ..Student::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(added.student_id, "UP2");
    assert_eq!(added.course_code, None);
    assert_eq!(added.supervisor, None);

    let duplicate = records::add_student(
        &db,
        &config,
        Student {
            student_id: "UP1".into(),
            ..Student::default()
        },
    )
    .await;
    assert!(matches!(duplicate, Err(EngineError::InvalidRecord(_))));

    let edited = records::edit_student(
        &db,
        &config,
        "UP2",
        StudentEdit {
            surname: Some("King".into()),
            course_code: Some("CS4001".into()),
            ..StudentEdit::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(edited.id, added.id);
    assert_eq!(edited.surname, "King");
    assert_eq!(edited.first_name, "Ada");
    let stored = records::list_students(&db, Some("king")).await.unwrap();
    assert_eq!(stored, vec![edited]);

    let clash = records::edit_student(
        &db,
        &config,
        &added.id,
        StudentEdit {
            student_id: Some("UP1".into()),
            ..StudentEdit::default()
        },
    )
    .await;
    assert!(matches!(clash, Err(EngineError::InvalidRecord(_))));

    let deleted = records::delete_student(&db, &config, "UP2").await.unwrap();
    assert_eq!(deleted.id, added.id);
    assert_eq!(records::list_students(&db, None).await.unwrap().len(), 1);
    let missing = records::delete_student(&db, &config, "UP2").await;
    assert!(matches!(missing, Err(EngineError::NotFound { .. })));
}

#[tokio::test]
async fn staff_add_rejects_blank_and_duplicate_email() {
    let db = common::db().await;
    let config = common::config();
    common::add_staff(&db, "A. Smith", 2).await;

    let blank = records::add_staff(
        &db,
        &config,
        StaffMember {
            full_name: "B. Jones".into(),
            ..StaffMember::default()
        },
    )
    .await;
    assert!(matches!(blank, Err(EngineError::InvalidRecord(_))));

    let taken = records::add_staff(
        &db,
        &config,
        StaffMember {
            full_name: "Another Smith".into(),
            email: "ASmith@example.ac.uk".into(),
            ..StaffMember::default()
        },
    )
    .await;
    assert!(matches!(taken, Err(EngineError::InvalidRecord(_))));

    let added = records::add_staff(
        &db,
        &config,
        StaffMember {
            full_name: "B. Jones".into(),
            email: "b.jones@example.ac.uk".into(),
            quota: 3,
            ..StaffMember::default()
        },
    )
    .await
    .unwrap();
    assert!(added.id.starts_with("stf-"));
    assert_eq!(records::list_staff(&db, None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn staff_edit_changes_quota_used_by_allocation() {
    let db = common::db().await;
    let config = common::config();
    let staff = common::add_staff(&db, "A. Smith", 1).await;
    common::add_student(&db, "UP1", None).await;
    common::add_student(&db, "UP2", None).await;

    let edited = records::edit_staff(
        &db,
        &config,
        "A. Smith",
        StaffEdit {
            quota: Some(2),
            avoid: Some(vec!["B. Jones".into()]),
            ..StaffEdit::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(edited.id, staff);
    assert_eq!(edited.quota, 2);
    assert_eq!(edited.email, "asmith@example.ac.uk");

    let report = allot_engine::allocate_default(&db, &config).await.unwrap();
    assert_eq!(report.supervisor.succeeded, 2);

    let unknown = records::edit_staff(&db, &config, "Nobody", StaffEdit::default()).await;
    assert!(matches!(unknown, Err(EngineError::NotFound { .. })));
}

#[tokio::test]
async fn staff_delete_reports_remaining_references() {
    let db = common::db().await;
    let config = common::config();
    let staff = common::add_staff(&db, "A. Smith", 3).await;
    let idle = common::add_staff(&db, "B. Jones", 3).await;
    let first = common::add_student(&db, "UP1", None).await;
    let second = common::add_student(&db, "UP2", None).await;
    common::assign(&db, &first, Role::Supervisor, &staff).await;
    common::assign(&db, &second, Role::Supervisor, &staff).await;
    common::assign(&db, &second, Role::Moderator, &staff).await;

    let removal = records::delete_staff(&db, &config, &staff).await.unwrap();
    assert_eq!(
        removal,
        StaffRemoval {
            staff_id: staff.clone(),
            full_name: "A. Smith".into(),
            still_supervising: 2,
            still_moderating: 1,
        }
    );
    assert_eq!(common::holder(&db, &first, Role::Supervisor).await, Some(staff));

    let quiet = records::delete_staff(&db, &config, "B. Jones").await.unwrap();
    assert_eq!(quiet.staff_id, idle);
    assert_eq!((quiet.still_supervising, quiet.still_moderating), (0, 0));
    assert!(records::list_staff(&db, None).await.unwrap().is_empty());
}
