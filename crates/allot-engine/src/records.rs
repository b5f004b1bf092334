//! Record management: CSV imports, single-record edits, bulk deletes,
//! listings, and the capacity table. None of these allocate.

use std::collections::HashSet;

use allot_config::EngineConfig;
use allot_core::entities::{InterestRecord, QuotaRecord, StaffMember, Student};
use allot_core::enums::{Collection, Role};
use allot_core::responses::{CapacityRow, DeleteSummary, ImportSummary, StaffRemoval};
use allot_db::AllotDb;
use allot_db::batch::BatchOutcome;
use allot_db::repos::interest::interest_set_op;
use allot_db::repos::quota::quota_set_op;
use allot_tabular::{InterestRow, QuotaRow, StaffRow, StudentRow};

use crate::capacity::CapacityTracker;
use crate::error::EngineError;
use crate::roster::Roster;

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn apply_outcome(summary: &mut ImportSummary, outcome: BatchOutcome) {
    summary.written = count(outcome.committed_ops);
    summary.failed_batches = count(outcome.failed_batches);
}

/// Add students whose `student_id` is not already present.
///
/// Rows without an ID, and repeats of an ID already stored or seen earlier in
/// the file, are skipped. `Supervisor` and `Moderator` cells may name staff by
/// document ID or full name; unresolvable values are left unset.
///
/// # Errors
///
/// Returns `EngineError` if existing records cannot be read.
pub async fn import_students(
    db: &AllotDb,
    config: &EngineConfig,
    rows: &[StudentRow],
) -> Result<ImportSummary, EngineError> {
    let roster = Roster::load(db, config.default_quota).await?;
    let mut seen: HashSet<String> = roster
        .students()
        .iter()
        .map(|s| s.student_id.clone())
        .collect();
    let resolve = |cell: Option<&String>, row: usize| -> Option<String> {
        let cell = cell?;
        let resolved = roster.resolve_staff(cell).map(|staff| staff.id.clone());
        if resolved.is_none() {
            tracing::warn!(row, staff = %cell, "unknown staff in student import, leaving unset");
        }
        resolved
    };

    let mut summary = ImportSummary::default();
    let mut ops = Vec::new();
    for row in rows {
        if row.student_id.is_empty() || !seen.insert(row.student_id.clone()) {
            summary.skipped += 1;
            continue;
        }
        let student = Student {
            id: String::new(),
            student_id: row.student_id.clone(),
            first_name: row.first_name.clone(),
            surname: row.surname.clone(),
            course_code: row.course_code.clone(),
            email: row.email.clone(),
            supervisor: resolve(row.supervisor.as_ref(), row.row),
            moderator: resolve(row.moderator.as_ref(), row.row),
        };
        ops.push(db.student_insert_op(&student).await?);
    }

    apply_outcome(&mut summary, db.commit_chunked(ops, config.batch_size).await);
    tracing::info!(written = summary.written, skipped = summary.skipped, "imported students");
    Ok(summary)
}

/// Add staff whose email is not already present (case-insensitive).
///
/// Rows missing a name or email are skipped. The `Quota` column seeds the
/// staff member's own quota; quota records are imported separately.
///
/// # Errors
///
/// Returns `EngineError` if existing records cannot be read.
pub async fn import_staff(
    db: &AllotDb,
    config: &EngineConfig,
    rows: &[StaffRow],
) -> Result<ImportSummary, EngineError> {
    let mut seen: HashSet<String> = db
        .list_staff()
        .await?
        .into_iter()
        .map(|staff| staff.email.to_lowercase())
        .collect();

    let mut summary = ImportSummary::default();
    let mut ops = Vec::new();
    for row in rows {
        if row.full_name.is_empty() || row.email.is_empty() {
            summary.skipped += 1;
            continue;
        }
        if !seen.insert(row.email.to_lowercase()) {
            tracing::debug!(row = row.row, email = %row.email, "staff email already present");
            summary.skipped += 1;
            continue;
        }
        let staff = StaffMember {
            id: String::new(),
            full_name: row.full_name.clone(),
            email: row.email.clone(),
            quota: row.quota.unwrap_or(0),
            avoid: row.avoid.clone(),
        };
        ops.push(db.staff_insert_op(&staff).await?);
    }

    apply_outcome(&mut summary, db.commit_chunked(ops, config.batch_size).await);
    tracing::info!(written = summary.written, skipped = summary.skipped, "imported staff");
    Ok(summary)
}

/// Write quota records for staff matched by full name.
///
/// Unknown names and quotas that are not whole numbers are rejected.
///
/// # Errors
///
/// Returns `EngineError` if the staff list cannot be read.
pub async fn import_quotas(
    db: &AllotDb,
    config: &EngineConfig,
    rows: &[QuotaRow],
) -> Result<ImportSummary, EngineError> {
    let roster = Roster::load(db, config.default_quota).await?;

    let mut summary = ImportSummary::default();
    let mut ops = Vec::new();
    for row in rows {
        let Some(staff) = roster.staff_by_name(&row.full_name) else {
            tracing::warn!(row = row.row, name = %row.full_name, "quota for unknown staff member");
            summary.rejected += 1;
            continue;
        };
        let Ok(quota) = row.quota.parse::<u32>() else {
            tracing::warn!(row = row.row, quota = %row.quota, "quota is not a whole number");
            summary.rejected += 1;
            continue;
        };
        ops.push(quota_set_op(&QuotaRecord {
            staff_id: staff.id.clone(),
            quota,
        }));
    }

    apply_outcome(&mut summary, db.commit_chunked(ops, config.batch_size).await);
    tracing::info!(written = summary.written, rejected = summary.rejected, "imported quotas");
    Ok(summary)
}

/// Merge interest records for staff matched by full name.
///
/// # Errors
///
/// Returns `EngineError` if the staff list cannot be read.
pub async fn import_interests(
    db: &AllotDb,
    config: &EngineConfig,
    rows: &[InterestRow],
) -> Result<ImportSummary, EngineError> {
    let roster = Roster::load(db, config.default_quota).await?;

    let mut summary = ImportSummary::default();
    let mut ops = Vec::new();
    for row in rows {
        let Some(staff) = roster.staff_by_name(&row.full_name) else {
            tracing::warn!(row = row.row, name = %row.full_name, "interests for unknown staff member");
            summary.rejected += 1;
            continue;
        };
        ops.push(interest_set_op(&InterestRecord {
            staff_id: staff.id.clone(),
            interests: row.interests.clone(),
            project_ideas: row.project_ideas.clone(),
        }));
    }

    apply_outcome(&mut summary, db.commit_chunked(ops, config.batch_size).await);
    tracing::info!(written = summary.written, rejected = summary.rejected, "imported interests");
    Ok(summary)
}

/// Delete every document in `collection` in chunked atomic batches.
///
/// # Errors
///
/// Returns `EngineError` if the collection cannot be read.
pub async fn delete_all(
    db: &AllotDb,
    config: &EngineConfig,
    collection: Collection,
) -> Result<DeleteSummary, EngineError> {
    let outcome = db.delete_collection(collection, config.batch_size).await?;
    Ok(DeleteSummary {
        deleted: count(outcome.committed_ops),
        failed_batches: count(outcome.failed_batches),
    })
}

// ---------------------------------------------------------------------------
// Single records
// ---------------------------------------------------------------------------

/// Changes to one student. `None` leaves a field alone; an empty
/// `course_code` or `email` clears it.
#[derive(Debug, Clone, Default)]
pub struct StudentEdit {
    pub student_id: Option<String>,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub course_code: Option<String>,
    pub email: Option<String>,
}

/// Changes to one staff member. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct StaffEdit {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub quota: Option<u32>,
    pub avoid: Option<Vec<String>>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn student_not_found(key: &str) -> EngineError {
    EngineError::NotFound {
        collection: Collection::Students,
        key: key.to_string(),
    }
}

fn staff_not_found(key: &str) -> EngineError {
    EngineError::NotFound {
        collection: Collection::Staff,
        key: key.to_string(),
    }
}

/// Add one student. Role fields are left for the allocation strategies.
///
/// # Errors
///
/// Returns `EngineError::InvalidRecord` for a blank or already used
/// `student_id`.
pub async fn add_student(
    db: &AllotDb,
    config: &EngineConfig,
    mut student: Student,
) -> Result<Student, EngineError> {
    student.student_id = student.student_id.trim().to_string();
    if student.student_id.is_empty() {
        return Err(EngineError::InvalidRecord("student ID is required".into()));
    }
    let roster = Roster::load(db, config.default_quota).await?;
    if roster.position_by_student_id(&student.student_id).is_some() {
        return Err(EngineError::InvalidRecord(format!(
            "student '{}' already exists",
            student.student_id
        )));
    }
    student.id = String::new();
    student.course_code = non_empty(student.course_code);
    student.email = non_empty(student.email);
    student.supervisor = None;
    student.moderator = None;

    let created = db.create_student(student).await?;
    tracing::info!(id = %created.id, student = %created.student_id, "added student");
    Ok(created)
}

/// Apply `edit` to the student matched by document ID or `student_id`.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown key and
/// `EngineError::InvalidRecord` when the new `student_id` is blank or taken.
pub async fn edit_student(
    db: &AllotDb,
    config: &EngineConfig,
    key: &str,
    edit: StudentEdit,
) -> Result<Student, EngineError> {
    let roster = Roster::load(db, config.default_quota).await?;
    let position = roster.resolve_student(key).ok_or_else(|| student_not_found(key))?;
    let mut student = roster.students()[position].clone();

    if let Some(student_id) = edit.student_id.map(|id| id.trim().to_string()) {
        if student_id.is_empty() {
            return Err(EngineError::InvalidRecord("student ID is required".into()));
        }
        if roster
            .position_by_student_id(&student_id)
            .is_some_and(|other| other != position)
        {
            return Err(EngineError::InvalidRecord(format!(
                "student '{student_id}' already exists"
            )));
        }
        student.student_id = student_id;
    }
    if let Some(first_name) = edit.first_name {
        student.first_name = first_name.trim().to_string();
    }
    if let Some(surname) = edit.surname {
        student.surname = surname.trim().to_string();
    }
    if edit.course_code.is_some() {
        student.course_code = non_empty(edit.course_code);
    }
    if edit.email.is_some() {
        student.email = non_empty(edit.email);
    }

    db.update_student(&student).await?;
    tracing::info!(id = %student.id, student = %student.student_id, "updated student");
    Ok(student)
}

/// Delete the student matched by document ID or `student_id`.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown key.
pub async fn delete_student(
    db: &AllotDb,
    config: &EngineConfig,
    key: &str,
) -> Result<Student, EngineError> {
    let roster = Roster::load(db, config.default_quota).await?;
    let position = roster.resolve_student(key).ok_or_else(|| student_not_found(key))?;
    let student = roster.students()[position].clone();
    if !db.delete(Collection::Students, &student.id).await? {
        return Err(student_not_found(key));
    }
    tracing::info!(id = %student.id, student = %student.student_id, "deleted student");
    Ok(student)
}

fn email_taken(roster: &Roster, email: &str, except: Option<&str>) -> bool {
    roster
        .staff()
        .iter()
        .filter(|staff| Some(staff.id.as_str()) != except)
        .any(|staff| staff.email.eq_ignore_ascii_case(email))
}

/// Add one staff member.
///
/// # Errors
///
/// Returns `EngineError::InvalidRecord` when the name or email is blank, or
/// the email already belongs to someone.
pub async fn add_staff(
    db: &AllotDb,
    config: &EngineConfig,
    mut staff: StaffMember,
) -> Result<StaffMember, EngineError> {
    staff.full_name = staff.full_name.trim().to_string();
    staff.email = staff.email.trim().to_string();
    if staff.full_name.is_empty() || staff.email.is_empty() {
        return Err(EngineError::InvalidRecord(
            "staff members need a full name and an email".into(),
        ));
    }
    let roster = Roster::load(db, config.default_quota).await?;
    if email_taken(&roster, &staff.email, None) {
        return Err(EngineError::InvalidRecord(format!(
            "email '{}' already belongs to a staff member",
            staff.email
        )));
    }
    staff.id = String::new();

    let created = db.create_staff(staff).await?;
    tracing::info!(id = %created.id, name = %created.full_name, "added staff member");
    Ok(created)
}

/// Apply `edit` to the staff member matched by document ID or full name.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown key and
/// `EngineError::InvalidRecord` when the name or email would be blank, or the
/// email belongs to someone else.
pub async fn edit_staff(
    db: &AllotDb,
    config: &EngineConfig,
    key: &str,
    edit: StaffEdit,
) -> Result<StaffMember, EngineError> {
    let roster = Roster::load(db, config.default_quota).await?;
    let mut staff = roster
        .resolve_staff(key)
        .cloned()
        .ok_or_else(|| staff_not_found(key))?;

    if let Some(full_name) = edit.full_name.map(|name| name.trim().to_string()) {
        if full_name.is_empty() {
            return Err(EngineError::InvalidRecord("full name cannot be blank".into()));
        }
        staff.full_name = full_name;
    }
    if let Some(email) = edit.email.map(|email| email.trim().to_string()) {
        if email.is_empty() {
            return Err(EngineError::InvalidRecord("email cannot be blank".into()));
        }
        if email_taken(&roster, &email, Some(staff.id.as_str())) {
            return Err(EngineError::InvalidRecord(format!(
                "email '{email}' already belongs to a staff member"
            )));
        }
        staff.email = email;
    }
    if let Some(quota) = edit.quota {
        staff.quota = quota;
    }
    if let Some(avoid) = edit.avoid {
        staff.avoid = avoid;
    }

    db.update_staff(&staff).await?;
    tracing::info!(id = %staff.id, name = %staff.full_name, "updated staff member");
    Ok(staff)
}

/// Delete the staff member matched by document ID or full name.
///
/// Students keep their references; the returned counts say how many. Those
/// references no longer resolve, so exports show them as unassigned and
/// capacity ignores them.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown key.
pub async fn delete_staff(
    db: &AllotDb,
    config: &EngineConfig,
    key: &str,
) -> Result<StaffRemoval, EngineError> {
    let roster = Roster::load(db, config.default_quota).await?;
    let staff = roster
        .resolve_staff(key)
        .cloned()
        .ok_or_else(|| staff_not_found(key))?;
    let holding = |role: Role| {
        count(
            roster
                .students()
                .iter()
                .filter(|student| student.holder(role) == Some(staff.id.as_str()))
                .count(),
        )
    };
    let removal = StaffRemoval {
        still_supervising: holding(Role::Supervisor),
        still_moderating: holding(Role::Moderator),
        staff_id: staff.id.clone(),
        full_name: staff.full_name.clone(),
    };

    if !db.delete(Collection::Staff, &staff.id).await? {
        return Err(staff_not_found(key));
    }
    if removal.still_supervising > 0 || removal.still_moderating > 0 {
        tracing::warn!(
            id = %removal.staff_id,
            name = %removal.full_name,
            supervising = removal.still_supervising,
            moderating = removal.still_moderating,
            "deleted staff member is still assigned to students"
        );
    } else {
        tracing::info!(id = %removal.staff_id, name = %removal.full_name, "deleted staff member");
    }
    Ok(removal)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Students whose ID, names, or course contain `search` (case-insensitive).
///
/// # Errors
///
/// Returns `EngineError` if the students cannot be read.
pub async fn list_students(db: &AllotDb, search: Option<&str>) -> Result<Vec<Student>, EngineError> {
    let students = db.list_students().await?;
    let Some(needle) = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty()) else {
        return Ok(students);
    };
    Ok(students
        .into_iter()
        .filter(|s| {
            contains_ci(&s.student_id, &needle)
                || contains_ci(&s.first_name, &needle)
                || contains_ci(&s.surname, &needle)
                || s.course().is_some_and(|c| contains_ci(c, &needle))
        })
        .collect())
}

/// Staff whose name or email contain `search` (case-insensitive).
///
/// # Errors
///
/// Returns `EngineError` if the staff cannot be read.
pub async fn list_staff(
    db: &AllotDb,
    search: Option<&str>,
) -> Result<Vec<StaffMember>, EngineError> {
    let staff = db.list_staff().await?;
    let Some(needle) = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty()) else {
        return Ok(staff);
    };
    Ok(staff
        .into_iter()
        .filter(|s| contains_ci(&s.full_name, &needle) || contains_ci(&s.email, &needle))
        .collect())
}

/// Remaining-quota table for every staff member, sorted by name.
///
/// # Errors
///
/// Returns `EngineError` if the roster cannot be loaded.
pub async fn capacity_summary(
    db: &AllotDb,
    config: &EngineConfig,
) -> Result<Vec<CapacityRow>, EngineError> {
    let roster = Roster::load(db, config.default_quota).await?;
    Ok(CapacityTracker::seed(&roster).summary(&roster))
}
