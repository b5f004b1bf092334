//! Import ranked student preferences, first come first served.

use std::cmp::Ordering;

use allot_core::enums::{Role, Strategy};
use allot_core::responses::AllocationReport;
use allot_tabular::{ChoiceForm, ChoiceRow};

use crate::error::Rejection;
use crate::matching::{detect_date_order, parse_timestamp, topic_matches};
use crate::session::AllocationSession;
use crate::strategies::reject;

/// Outcome of one preference row that did not fail.
enum Placement {
    Assigned,
    AlreadySupervised,
}

/// Rows in processing order: by timestamp ascending when the form has a
/// timestamp column, with unparseable timestamps last; file order otherwise.
#[must_use]
pub fn ordered(form: &ChoiceForm) -> Vec<&ChoiceRow> {
    if !form.has_timestamp {
        return form.rows.iter().collect();
    }
    let order = detect_date_order(form.rows.iter().filter_map(|row| row.timestamp.as_deref()));
    let mut keyed: Vec<_> = form
        .rows
        .iter()
        .map(|row| {
            let stamp = row.timestamp.as_deref().and_then(|raw| parse_timestamp(raw, order));
            (stamp, row)
        })
        .collect();
    let unparseable = keyed.iter().filter(|(stamp, _)| stamp.is_none()).count();
    if unparseable > 0 {
        tracing::warn!(
            rows = unparseable,
            ?order,
            "unreadable timestamps; those rows are processed last in file order"
        );
    }
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Give each student without a supervisor their highest-ranked choice that
/// still has capacity, falling back to a topic match.
pub async fn run(session: &mut AllocationSession<'_>, form: &ChoiceForm) -> AllocationReport {
    let mut report = AllocationReport::new(Strategy::StudentChoice);

    for row in ordered(form) {
        let student = (!row.student_id.is_empty()).then_some(row.student_id.as_str());
        match place(session, row).await {
            Ok(Placement::Assigned) => report.record_success(Role::Supervisor),
            Ok(Placement::AlreadySupervised) => {
                tracing::debug!(row = row.row, student = %row.student_id, "already supervised, skipping");
                report.record_skip();
            }
            Err(rejection) => reject(
                &mut report,
                rejection,
                Some(row.row),
                student,
                Some(Role::Supervisor),
            ),
        }
    }

    session.conclude(report)
}

async fn place(session: &mut AllocationSession<'_>, row: &ChoiceRow) -> Result<Placement, Rejection> {
    if row.student_id.is_empty() {
        return Err(Rejection::validation("missing student ID"));
    }
    let position = session
        .roster()
        .position_by_student_id(&row.student_id)
        .ok_or_else(|| Rejection::lookup(format!("no student '{}'", row.student_id)))?;
    if !session.roster().students()[position].lacks(Role::Supervisor) {
        return Ok(Placement::AlreadySupervised);
    }

    let mut last_write_error = None;
    for (rank, choice) in row.choices.iter().enumerate() {
        if choice.is_empty() {
            continue;
        }
        let Some(staff_id) = session.roster().staff_by_name(choice).map(|s| s.id.clone()) else {
            tracing::debug!(row = row.row, choice = %choice, "unknown staff choice, passing over");
            continue;
        };
        if !session.tracker().has_capacity(&staff_id, Role::Supervisor) {
            continue;
        }
        match session.allocate(position, Some(&staff_id), Role::Supervisor).await {
            Ok(()) => {
                tracing::debug!(row = row.row, rank = rank + 1, staff = %staff_id, "choice granted");
                return Ok(Placement::Assigned);
            }
            Err(rejection) => last_write_error = Some(rejection),
        }
    }

    let fallback = row
        .topic
        .as_deref()
        .and_then(|topic| topic_candidate(session, topic));
    if let Some(staff_id) = fallback {
        session
            .allocate(position, Some(&staff_id), Role::Supervisor)
            .await?;
        tracing::debug!(row = row.row, staff = %staff_id, "assigned by topic match");
        return Ok(Placement::Assigned);
    }

    Err(last_write_error.unwrap_or_else(|| {
        Rejection::capacity("no choice or topic match has supervisor capacity")
    }))
}

/// Staff member with a matching interest and supervisor capacity who has the
/// fewest total allocations; roster order breaks ties.
fn topic_candidate(session: &AllocationSession<'_>, topic: &str) -> Option<String> {
    let roster = session.roster();
    let tracker = session.tracker();
    roster
        .staff()
        .iter()
        .filter(|staff| {
            roster
                .interests_of(&staff.id)
                .iter()
                .any(|interest| topic_matches(topic, interest))
        })
        .filter(|staff| tracker.has_capacity(&staff.id, Role::Supervisor))
        .min_by_key(|staff| tracker.total_for(&staff.id))
        .map(|staff| staff.id.clone())
}
