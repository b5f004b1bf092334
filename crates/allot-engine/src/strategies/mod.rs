//! The four allocation procedures.
//!
//! Each strategy consumes an open [`AllocationSession`], issues assignment
//! operations one at a time, and returns an [`AllocationReport`] with residual
//! counts stamped on. Per-row problems become [`RowFailure`]s; nothing here
//! aborts a run.
//!
//! [`AllocationSession`]: crate::session::AllocationSession

pub mod default_fill;
pub mod manual;
pub mod self_report;
pub mod student_choice;

use allot_core::enums::Role;
use allot_core::responses::{AllocationReport, RowFailure};

use crate::error::Rejection;

/// Log a rejection and add it to the report.
pub(crate) fn reject(
    report: &mut AllocationReport,
    rejection: Rejection,
    row: Option<usize>,
    student: Option<&str>,
    role: Option<Role>,
) {
    tracing::warn!(
        row,
        student = student.unwrap_or("-"),
        role = role.map_or("-", Role::as_str),
        kind = rejection.kind.as_str(),
        reason = %rejection.reason,
        "allocation failed"
    );
    report.record_failure(RowFailure {
        row,
        student: student.map(String::from),
        role,
        kind: rejection.kind,
        reason: rejection.reason,
    });
}
