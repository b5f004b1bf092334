//! Allocation exports: one row per student with resolved staff names.

use std::io;

use allot_config::EngineConfig;
use allot_core::entities::Student;
use allot_core::enums::Role;
use allot_core::responses::{ExportRow, ModeratorExportRow, SupervisorExportRow, UNASSIGNED};
use allot_db::AllotDb;

use crate::error::EngineError;
use crate::roster::Roster;

/// Name and email of the staff member holding `role`. Each field falls back
/// to `Unassigned` on its own: both when the slot is empty or the ID no longer
/// resolves, and either one when the staff record leaves it blank.
fn holder_contact(roster: &Roster, student: &Student, role: Role) -> (String, String) {
    let or_unassigned = |value: &str| {
        if value.trim().is_empty() {
            UNASSIGNED.to_string()
        } else {
            value.to_string()
        }
    };
    student
        .holder(role)
        .and_then(|id| roster.staff_by_id(id))
        .map_or_else(
            || (UNASSIGNED.to_string(), UNASSIGNED.to_string()),
            |staff| (or_unassigned(&staff.full_name), or_unassigned(&staff.email)),
        )
}

#[must_use]
pub fn full_rows(roster: &Roster) -> Vec<ExportRow> {
    roster
        .students()
        .iter()
        .map(|student| {
            let (supervisor_name, supervisor_email) =
                holder_contact(roster, student, Role::Supervisor);
            let (moderator_name, moderator_email) =
                holder_contact(roster, student, Role::Moderator);
            ExportRow {
                student_id: student.student_id.clone(),
                student_name: student.full_name(),
                supervisor_name,
                supervisor_email,
                moderator_name,
                moderator_email,
            }
        })
        .collect()
}

#[must_use]
pub fn supervisor_rows(roster: &Roster) -> Vec<SupervisorExportRow> {
    roster
        .students()
        .iter()
        .map(|student| {
            let (supervisor_name, supervisor_email) =
                holder_contact(roster, student, Role::Supervisor);
            SupervisorExportRow {
                student_id: student.student_id.clone(),
                student_name: student.full_name(),
                supervisor_name,
                supervisor_email,
            }
        })
        .collect()
}

#[must_use]
pub fn moderator_rows(roster: &Roster) -> Vec<ModeratorExportRow> {
    roster
        .students()
        .iter()
        .map(|student| ModeratorExportRow {
            student_id: student.student_id.clone(),
            moderator_name: holder_contact(roster, student, Role::Moderator).0,
        })
        .collect()
}

/// Load the current roster and write it as CSV: every column when `role` is
/// `None`, or the narrower per-role layout.
///
/// # Errors
///
/// Returns `EngineError` if the roster cannot be loaded or the CSV cannot be
/// written.
pub async fn write_export<W: io::Write>(
    db: &AllotDb,
    config: &EngineConfig,
    role: Option<Role>,
    writer: W,
) -> Result<usize, EngineError> {
    let roster = Roster::load(db, config.default_quota).await?;
    match role {
        None => allot_tabular::write_csv(writer, &full_rows(&roster))?,
        Some(Role::Supervisor) => allot_tabular::write_csv(writer, &supervisor_rows(&roster))?,
        Some(Role::Moderator) => allot_tabular::write_csv(writer, &moderator_rows(&roster))?,
    }
    tracing::info!(students = roster.students().len(), role = ?role, "exported allocations");
    Ok(roster.students().len())
}
