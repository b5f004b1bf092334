//! Import staff self-reported supervision and moderation agreements.

use allot_core::enums::{Role, Strategy};
use allot_core::responses::AllocationReport;
use allot_tabular::SelfReportRow;

use crate::error::Rejection;
use crate::matching::normalize_student_id;
use crate::session::AllocationSession;
use crate::strategies::reject;

/// Apply each agreed row in file order. Capacity is not checked: a staff
/// member's own agreement is authoritative.
pub async fn run(session: &mut AllocationSession<'_>, rows: &[SelfReportRow]) -> AllocationReport {
    let mut report = AllocationReport::new(Strategy::SelfReport);

    for row in rows {
        if row.agreement != session.config().affirmative {
            tracing::debug!(row = row.row, agreement = %row.agreement, "not agreed, skipping");
            report.record_skip();
            continue;
        }

        let role = Role::parse_tag(&row.role);
        let student = (!row.student_id.is_empty()).then_some(row.student_id.as_str());
        match apply(session, row, role).await {
            Ok(role) => report.record_success(role),
            Err(rejection) => reject(&mut report, rejection, Some(row.row), student, role),
        }
    }

    session.conclude(report)
}

async fn apply(
    session: &mut AllocationSession<'_>,
    row: &SelfReportRow,
    role: Option<Role>,
) -> Result<Role, Rejection> {
    let role = role.ok_or_else(|| Rejection::validation(format!("unknown role '{}'", row.role)))?;
    if row.student_id.trim().is_empty() {
        return Err(Rejection::validation("missing student ID"));
    }

    let prefix = session.config().institution_prefix.clone();
    let bare = normalize_student_id(&row.student_id, &prefix);
    let prefixed = format!("{prefix}{bare}");
    let matches: Vec<usize> = session
        .roster()
        .students()
        .iter()
        .enumerate()
        .filter(|(_, s)| s.student_id == bare || s.student_id == prefixed)
        .map(|(position, _)| position)
        .collect();
    let position = match matches.as_slice() {
        [position] => *position,
        [] => return Err(Rejection::lookup(format!("no student '{}'", row.student_id))),
        _ => {
            return Err(Rejection::lookup(format!(
                "{} students match '{}'",
                matches.len(),
                row.student_id
            )));
        }
    };

    let staff_id = session
        .roster()
        .staff_by_name(&row.staff_name)
        .map(|staff| staff.id.clone())
        .ok_or_else(|| Rejection::lookup(format!("no staff member '{}'", row.staff_name)))?;

    session.allocate(position, Some(&staff_id), role).await?;
    Ok(role)
}
