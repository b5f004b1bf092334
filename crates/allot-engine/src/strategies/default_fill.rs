//! Automatic fill-in of every missing supervisor and moderator.
//!
//! Students are grouped by course, higher course levels first. Supervisors
//! prefer staff whose interests cover the course's department; moderators
//! prefer anyone other than the student's supervisor. In both passes the staff
//! member with the largest share of quota still free goes first.

use allot_core::enums::{Role, Strategy};
use allot_core::responses::AllocationReport;

use crate::capacity::CapacityTracker;
use crate::error::Rejection;
use crate::matching::{course_level, department_tag, interest_covers_department};
use crate::roster::Roster;
use crate::session::AllocationSession;
use crate::strategies::reject;

/// Label for students with no course code.
pub const UNKNOWN_COURSE: &str = "Unknown";

/// Students sharing a course code, by roster position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseGroup {
    pub course: String,
    /// Department tag used for interest matching; empty for [`UNKNOWN_COURSE`].
    pub department: String,
    pub level: u32,
    pub members: Vec<usize>,
}

/// Group the students lacking `role` by course code, ordered by course level
/// descending with first-appearance order among equal levels.
#[must_use]
pub fn group_by_course(roster: &Roster, role: Role) -> Vec<CourseGroup> {
    let mut groups: Vec<CourseGroup> = Vec::new();
    for (position, student) in roster.students().iter().enumerate() {
        if !student.lacks(role) {
            continue;
        }
        let course = student.course().unwrap_or(UNKNOWN_COURSE);
        if let Some(group) = groups.iter_mut().find(|g| g.course == course) {
            group.members.push(position);
            continue;
        }
        let (department, level) = match student.course() {
            Some(code) => (department_tag(code).to_string(), course_level(code)),
            None => (String::new(), 0),
        };
        groups.push(CourseGroup {
            course: course.to_string(),
            department,
            level,
            members: vec![position],
        });
    }
    groups.sort_by(|a, b| b.level.cmp(&a.level));
    groups
}

/// Fill every missing supervisor, then every missing moderator.
pub async fn run(session: &mut AllocationSession<'_>) -> AllocationReport {
    let mut report = AllocationReport::new(Strategy::DefaultFill);

    let supervisor_groups = group_by_course(session.roster(), Role::Supervisor);
    let moderator_groups = group_by_course(session.roster(), Role::Moderator);
    if supervisor_groups.is_empty() && moderator_groups.is_empty() {
        tracing::info!("every student has a supervisor and a moderator");
        return session.conclude(report);
    }

    for group in pass_groups(session, &supervisor_groups, Role::Supervisor) {
        tracing::debug!(course = %group.course, students = group.members.len(), "supervisor pass");
        for &position in &group.members {
            let candidates = supervisor_candidates(session, &group.department);
            let outcome = commit_first(session, position, candidates, Role::Supervisor).await;
            tally(&mut report, session, outcome, position, Role::Supervisor);
        }
    }

    for group in pass_groups(session, &moderator_groups, Role::Moderator) {
        tracing::debug!(course = %group.course, students = group.members.len(), "moderator pass");
        for &position in &group.members {
            let candidates = moderator_candidates(session, position);
            let outcome = commit_first(session, position, candidates, Role::Moderator).await;
            tally(&mut report, session, outcome, position, Role::Moderator);
        }
    }

    session.conclude(report)
}

/// The groups a pass should walk. A pass that starts with no capacity left
/// for its role walks nothing; its students stay in the residual untallied.
fn pass_groups<'g>(
    session: &AllocationSession<'_>,
    groups: &'g [CourseGroup],
    role: Role,
) -> &'g [CourseGroup] {
    if groups.is_empty() || session.tracker().any_capacity(role) {
        return groups;
    }
    let waiting: usize = groups.iter().map(|g| g.members.len()).sum();
    tracing::info!(%role, waiting, "no staff member has capacity left; pass skipped");
    &[]
}

fn tally(
    report: &mut AllocationReport,
    session: &AllocationSession<'_>,
    outcome: Result<(), Rejection>,
    position: usize,
    role: Role,
) {
    match outcome {
        Ok(()) => report.record_success(role),
        Err(rejection) => {
            let student = session
                .roster()
                .students()
                .get(position)
                .map(|s| s.student_id.as_str());
            reject(report, rejection, None, student, Some(role));
        }
    }
}

/// Capacity-holding staff, most free quota share first (stable).
fn ranked<'r>(
    roster: &'r Roster,
    tracker: &CapacityTracker,
    role: Role,
    keep: impl Fn(&str) -> bool,
) -> Vec<&'r str> {
    let mut ids: Vec<&str> = roster
        .staff()
        .iter()
        .map(|staff| staff.id.as_str())
        .filter(|id| tracker.has_capacity(id, role) && keep(*id))
        .collect();
    ids.sort_by(|a, b| {
        tracker
            .remaining_fraction(b, role)
            .total_cmp(&tracker.remaining_fraction(a, role))
    });
    ids
}

fn supervisor_candidates(session: &AllocationSession<'_>, department: &str) -> Vec<String> {
    let roster = session.roster();
    let tracker = session.tracker();
    let interested = ranked(roster, tracker, Role::Supervisor, |id| {
        roster
            .interests_of(id)
            .iter()
            .any(|interest| interest_covers_department(interest, department))
    });
    let pool = if interested.is_empty() {
        ranked(roster, tracker, Role::Supervisor, |_| true)
    } else {
        interested
    };
    pool.into_iter().map(String::from).collect()
}

fn moderator_candidates(session: &AllocationSession<'_>, position: usize) -> Vec<String> {
    let roster = session.roster();
    let tracker = session.tracker();
    let supervisor = roster
        .students()
        .get(position)
        .and_then(|student| student.holder(Role::Supervisor));
    let others = ranked(roster, tracker, Role::Moderator, |id| Some(id) != supervisor);
    let pool = if others.is_empty() {
        ranked(roster, tracker, Role::Moderator, |_| true)
    } else {
        others
    };
    pool.into_iter().map(String::from).collect()
}

/// Re-check the top candidate's capacity and commit.
async fn commit_first(
    session: &mut AllocationSession<'_>,
    position: usize,
    candidates: Vec<String>,
    role: Role,
) -> Result<(), Rejection> {
    let Some(staff_id) = candidates.into_iter().next() else {
        return Err(Rejection::capacity(format!("no staff member has {role} capacity")));
    };
    if !session.tracker().has_capacity(&staff_id, role) {
        return Err(Rejection::capacity(format!("{staff_id} reached quota before commit")));
    }
    session.allocate(position, Some(&staff_id), role).await
}

#[cfg(test)]
mod tests {
    use allot_core::entities::Student;
    use pretty_assertions::assert_eq;

    use super::*;

    fn student(id: &str, course: Option<&str>) -> Student {
        Student {
            id: id.into(),
            student_id: id.to_uppercase(),
            course_code: course.map(String::from),
            ..Student::default()
        }
    }

    #[test]
    fn groups_order_by_level_then_first_appearance() {
        let roster = Roster::from_parts(
            vec![
                student("a", Some("MA3001")),
                student("b", None),
                student("c", Some("CS4001")),
                student("d", Some("MA3001")),
                student("e", Some("PH3100")),
                student("f", Some("  ")),
            ],
            vec![],
            vec![],
            vec![],
            5,
        );
        let groups = group_by_course(&roster, Role::Supervisor);
        let summary: Vec<(&str, &str, u32, Vec<usize>)> = groups
            .iter()
            .map(|g| (g.course.as_str(), g.department.as_str(), g.level, g.members.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("CS4001", "CS", 4, vec![2]),
                ("MA3001", "MA", 3, vec![0, 3]),
                ("PH3100", "PH", 3, vec![4]),
                ("Unknown", "", 0, vec![1, 5]),
            ]
        );
    }

    #[test]
    fn groups_skip_students_holding_the_role() {
        let mut held = student("a", Some("CS4001"));
        held.moderator = Some("stf-1".into());
        let roster = Roster::from_parts(vec![held], vec![], vec![], vec![], 5);
        assert!(group_by_course(&roster, Role::Moderator).is_empty());
        assert_eq!(group_by_course(&roster, Role::Supervisor).len(), 1);
    }
}
