mod common;

use allot_core::enums::{FailureKind, Role, Strategy};
use allot_engine::{ManualTarget, allocate_manual, manual_candidates};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn assigns_by_name_and_clears() {
    let db = common::db().await;
    let student = common::add_student(&db, "UP1", None).await;
    let staff = common::add_staff(&db, "A. Smith", 1).await;
    let config = common::config();

    let report = allocate_manual(
        &db,
        &config,
        "UP1",
        Role::Supervisor,
        &ManualTarget::Staff("A. Smith".into()),
    )
    .await
    .unwrap();
    assert_eq!(report.strategy, Strategy::Manual);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.residual.supervisor, 0);
    assert_eq!(common::holder(&db, &student, Role::Supervisor).await, Some(staff));

    let report = allocate_manual(&db, &config, &student, Role::Supervisor, &ManualTarget::Clear)
        .await
        .unwrap();
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.residual.supervisor, 1);
    assert_eq!(common::holder(&db, &student, Role::Supervisor).await, None);
}

#[tokio::test]
async fn override_past_quota_is_allowed() {
    let db = common::db().await;
    let first = common::add_student(&db, "UP1", None).await;
    let second = common::add_student(&db, "UP2", None).await;
    let staff = common::add_staff(&db, "A. Smith", 1).await;
    common::assign(&db, &first, Role::Moderator, &staff).await;

    let report = allocate_manual(
        &db,
        &common::config(),
        "UP2",
        Role::Moderator,
        &ManualTarget::Staff(staff.clone()),
    )
    .await
    .unwrap();
    assert_eq!(report.succeeded, 1);
    assert_eq!(common::holder(&db, &second, Role::Moderator).await, Some(staff));
}

#[tokio::test]
async fn unknown_student_or_staff_is_a_lookup_failure() {
    let db = common::db().await;
    common::add_student(&db, "UP1", None).await;
    common::add_staff(&db, "A. Smith", 1).await;
    let config = common::config();

    let report = allocate_manual(
        &db,
        &config,
        "UP404",
        Role::Supervisor,
        &ManualTarget::Staff("A. Smith".into()),
    )
    .await
    .unwrap();
    assert_eq!(report.failures[0].kind, FailureKind::Lookup);

    let report = allocate_manual(
        &db,
        &config,
        "UP1",
        Role::Supervisor,
        &ManualTarget::Staff("Nobody".into()),
    )
    .await
    .unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.supervisor.failed, 1);
    assert_eq!(report.failures[0].kind, FailureKind::Lookup);
}

#[tokio::test]
async fn candidates_include_current_holder_at_capacity() {
    let db = common::db().await;
    let student = common::add_student(&db, "UP1", None).await;
    let full = common::add_staff(&db, "A. Full", 1).await;
    let free = common::add_staff(&db, "B. Free", 1).await;
    let other_full = common::add_staff(&db, "C. Busy", 1).await;
    let other = common::add_student(&db, "UP2", None).await;
    common::assign(&db, &student, Role::Supervisor, &full).await;
    common::assign(&db, &other, Role::Supervisor, &other_full).await;

    let config = common::config();
    let ids: Vec<String> = manual_candidates(&db, &config, "UP1", Role::Supervisor)
        .await
        .unwrap()
        .unwrap()
        .into_iter()
        .map(|staff| staff.id)
        .collect();
    assert_eq!(ids, vec![full, free]);

    assert!(
        manual_candidates(&db, &config, "UP404", Role::Supervisor)
            .await
            .unwrap()
            .is_none()
    );
}
