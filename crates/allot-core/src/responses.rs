//! Response types returned by the engine and rendered by `allot` commands.
//!
//! These structs define the shape of JSON/table output for allocation runs,
//! exports, capacity summaries, and record-management commands.

use serde::{Deserialize, Serialize};

use crate::enums::{FailureKind, Role, Strategy};

/// Placeholder written into export cells for an unset or unresolvable role.
pub const UNASSIGNED: &str = "Unassigned";

// ---------------------------------------------------------------------------
// Allocation report
// ---------------------------------------------------------------------------

/// Success/failure tally for one role.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleTally {
    pub succeeded: u32,
    pub failed: u32,
}

/// Students still missing each role once a strategy has finished.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Residual {
    pub supervisor: u32,
    pub moderator: u32,
}

impl Residual {
    #[must_use]
    pub const fn get(&self, role: Role) -> u32 {
        match role {
            Role::Supervisor => self.supervisor,
            Role::Moderator => self.moderator,
        }
    }
}

/// One row or student that could not be allocated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RowFailure {
    /// Spreadsheet row number in the import file (the header is row 1).
    pub row: Option<usize>,
    /// Student identifier as given (or as stored, for default fill).
    pub student: Option<String>,
    pub role: Option<Role>,
    pub kind: FailureKind,
    pub reason: String,
}

/// Outcome of one strategy invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllocationReport {
    pub strategy: Strategy,
    pub succeeded: u32,
    pub failed: u32,
    /// Rows deliberately passed over (declined agreements, students already
    /// holding the role). Skips are neither successes nor failures.
    pub skipped: u32,
    pub supervisor: RoleTally,
    pub moderator: RoleTally,
    pub residual: Residual,
    pub failures: Vec<RowFailure>,
}

impl AllocationReport {
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            succeeded: 0,
            failed: 0,
            skipped: 0,
            supervisor: RoleTally::default(),
            moderator: RoleTally::default(),
            residual: Residual::default(),
            failures: Vec::new(),
        }
    }

    pub fn record_success(&mut self, role: Role) {
        self.succeeded += 1;
        self.tally_mut(role).succeeded += 1;
    }

    pub fn record_failure(&mut self, failure: RowFailure) {
        self.failed += 1;
        if let Some(role) = failure.role {
            self.tally_mut(role).failed += 1;
        }
        self.failures.push(failure);
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    #[must_use]
    pub const fn tally(&self, role: Role) -> RoleTally {
        match role {
            Role::Supervisor => self.supervisor,
            Role::Moderator => self.moderator,
        }
    }

    fn tally_mut(&mut self, role: Role) -> &mut RoleTally {
        match role {
            Role::Supervisor => &mut self.supervisor,
            Role::Moderator => &mut self.moderator,
        }
    }

    /// Whether the run changed nothing and found nothing wrong.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.succeeded == 0 && self.failed == 0
    }
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

/// One student with both resolved roles, in export column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ExportRow {
    #[serde(rename = "StudentID")]
    pub student_id: String,
    pub student_name: String,
    pub supervisor_name: String,
    pub supervisor_email: String,
    pub moderator_name: String,
    pub moderator_email: String,
}

/// Supervisor-only export row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SupervisorExportRow {
    #[serde(rename = "StudentID")]
    pub student_id: String,
    pub student_name: String,
    pub supervisor_name: String,
    pub supervisor_email: String,
}

/// Moderator-only export row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ModeratorExportRow {
    #[serde(rename = "StudentID")]
    pub student_id: String,
    pub moderator_name: String,
}

// ---------------------------------------------------------------------------
// Capacity summary
// ---------------------------------------------------------------------------

/// Remaining quota for one staff member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapacityRow {
    pub staff_id: String,
    pub full_name: String,
    pub email: String,
    pub quota: u32,
    pub supervisor_allocations: u32,
    pub remaining_supervisor: u32,
    pub moderator_allocations: u32,
    pub remaining_moderator: u32,
}

// ---------------------------------------------------------------------------
// Record management
// ---------------------------------------------------------------------------

/// Outcome of a CSV record import.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows written to the store.
    pub written: u32,
    /// Rows skipped because the record already exists or lacks key fields.
    pub skipped: u32,
    /// Rows that referenced unknown staff or carried unparseable values.
    pub rejected: u32,
    /// Batches that failed to commit; their rows are not counted as written.
    pub failed_batches: u32,
}

/// A deleted staff member and the students still pointing at them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaffRemoval {
    pub staff_id: String,
    pub full_name: String,
    pub still_supervising: u32,
    pub still_moderating: u32,
}

/// Outcome of a chunked bulk delete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteSummary {
    pub deleted: u32,
    pub failed_batches: u32,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn report_tallies_per_role() {
        let mut report = AllocationReport::new(Strategy::DefaultFill);
        report.record_success(Role::Supervisor);
        report.record_success(Role::Moderator);
        report.record_failure(RowFailure {
            row: None,
            student: Some("UP1".into()),
            role: Some(Role::Moderator),
            kind: FailureKind::CapacityExhausted,
            reason: "no capacity".into(),
        });
        report.record_skip();

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(
            report.tally(Role::Moderator),
            RoleTally {
                succeeded: 1,
                failed: 1
            }
        );
        assert!(!report.is_noop());
    }

    #[test]
    fn failure_without_role_only_counts_in_total() {
        let mut report = AllocationReport::new(Strategy::SelfReport);
        report.record_failure(RowFailure {
            row: Some(3),
            student: None,
            role: None,
            kind: FailureKind::Validation,
            reason: "unknown role".into(),
        });
        assert_eq!(report.failed, 1);
        assert_eq!(report.supervisor, RoleTally::default());
        assert_eq!(report.moderator, RoleTally::default());
    }

    #[test]
    fn export_row_uses_spreadsheet_headers() {
        let row = ExportRow {
            student_id: "UP1".into(),
            student_name: "Doe, Jo".into(),
            supervisor_name: UNASSIGNED.into(),
            supervisor_email: UNASSIGNED.into(),
            moderator_name: "A. Smith".into(),
            moderator_email: "a.smith@example.ac.uk".into(),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["StudentID"], "UP1");
        assert_eq!(value["StudentName"], "Doe, Jo");
        assert_eq!(value["ModeratorEmail"], "a.smith@example.ac.uk");
    }
}
