//! Operator-driven single assignment.

use allot_core::entities::StaffMember;
use allot_core::enums::{Role, Strategy};
use allot_core::responses::AllocationReport;

use crate::error::Rejection;
use crate::session::AllocationSession;
use crate::strategies::reject;

/// What the operator asked to put in the role slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualTarget {
    /// A staff document ID or exact full name.
    Staff(String),
    Clear,
}

/// Assign (or clear) one role for one student, bypassing capacity.
///
/// `student` is a document ID or a `student_id`. Pushing a staff member past
/// quota, or making them both supervisor and moderator, is allowed but logged.
pub async fn run(
    session: &mut AllocationSession<'_>,
    student: &str,
    role: Role,
    target: &ManualTarget,
) -> AllocationReport {
    let mut report = AllocationReport::new(Strategy::Manual);
    match assign(session, student, role, target).await {
        Ok(()) => report.record_success(role),
        Err(rejection) => reject(&mut report, rejection, None, Some(student), Some(role)),
    }
    session.conclude(report)
}

async fn assign(
    session: &mut AllocationSession<'_>,
    student: &str,
    role: Role,
    target: &ManualTarget,
) -> Result<(), Rejection> {
    let position = session
        .roster()
        .resolve_student(student)
        .ok_or_else(|| Rejection::lookup(format!("no student '{student}'")))?;

    let staff_id = match target {
        ManualTarget::Clear => None,
        ManualTarget::Staff(key) => {
            let staff = session
                .roster()
                .resolve_staff(key)
                .ok_or_else(|| Rejection::lookup(format!("no staff member '{key}'")))?;
            warn_on_override(session, position, staff, role);
            Some(staff.id.clone())
        }
    };

    session.allocate(position, staff_id.as_deref(), role).await
}

fn warn_on_override(
    session: &AllocationSession<'_>,
    position: usize,
    staff: &StaffMember,
    role: Role,
) {
    let Some(student) = session.roster().students().get(position) else {
        return;
    };
    let already_holds = student.holder(role) == Some(staff.id.as_str());
    if !already_holds && !session.tracker().has_capacity(&staff.id, role) {
        tracing::warn!(
            staff = %staff.full_name,
            %role,
            quota = session.tracker().quota(&staff.id).unwrap_or(0),
            "manual assignment exceeds quota"
        );
    }
    let other = match role {
        Role::Supervisor => Role::Moderator,
        Role::Moderator => Role::Supervisor,
    };
    if student.holder(other) == Some(staff.id.as_str()) {
        tracing::warn!(
            staff = %staff.full_name,
            student = %student.student_id,
            "same staff member would supervise and moderate"
        );
    }
}

/// Staff eligible for `role` of `student`: everyone with remaining capacity,
/// plus the current holder. Roster order.
///
/// Returns `None` when the student cannot be found.
#[must_use]
pub fn candidates<'s>(
    session: &'s AllocationSession<'_>,
    student: &str,
    role: Role,
) -> Option<Vec<&'s StaffMember>> {
    let position = session.roster().resolve_student(student)?;
    let holder = session.roster().students()[position].holder(role);
    Some(
        session
            .roster()
            .staff()
            .iter()
            .filter(|staff| {
                holder == Some(staff.id.as_str()) || session.tracker().has_capacity(&staff.id, role)
            })
            .collect(),
    )
}
