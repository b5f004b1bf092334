//! One allocation run: roster, capacity tracker, and the assignment operation.

use allot_config::EngineConfig;
use allot_core::enums::Role;
use allot_core::responses::{AllocationReport, Residual};
use allot_db::AllotDb;

use crate::capacity::CapacityTracker;
use crate::error::{EngineError, Rejection};
use crate::roster::Roster;

/// State owned by a single strategy invocation and dropped at run end.
pub struct AllocationSession<'a> {
    db: &'a AllotDb,
    config: EngineConfig,
    roster: Roster,
    tracker: CapacityTracker,
}

impl<'a> AllocationSession<'a> {
    /// Load the roster and seed capacity counters.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Database` if the roster cannot be loaded.
    pub async fn open(db: &'a AllotDb, config: &EngineConfig) -> Result<Self, EngineError> {
        let roster = Roster::load(db, config.default_quota).await?;
        let tracker = CapacityTracker::seed(&roster);
        Ok(Self {
            db,
            config: config.clone(),
            roster,
            tracker,
        })
    }

    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub const fn tracker(&self) -> &CapacityTracker {
        &self.tracker
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assign `role` of the student at roster position `student` to
    /// `staff_id`, or clear it with `None`.
    ///
    /// Persists first; only a successful write updates the cached student and
    /// the capacity counters. No capacity check is made here.
    ///
    /// # Errors
    ///
    /// Returns a `Lookup` rejection for an out-of-range position and a
    /// `Persistence` rejection when the store refuses the write.
    pub async fn allocate(
        &mut self,
        student: usize,
        staff_id: Option<&str>,
        role: Role,
    ) -> Result<(), Rejection> {
        let staff_id = staff_id.filter(|id| !id.is_empty());
        let (doc_id, previous) = match self.roster.students.get(student) {
            Some(s) => (s.id.clone(), s.holder(role).map(String::from)),
            None => return Err(Rejection::lookup(format!("no student at position {student}"))),
        };

        if let Err(error) = self.db.set_student_role(&doc_id, role, staff_id).await {
            tracing::warn!(student = %doc_id, %role, %error, "assignment write failed");
            return Err(Rejection::persistence(error.to_string()));
        }

        if let Some(cached) = self.roster.students.get_mut(student) {
            cached.set_holder(role, staff_id.map(String::from));
        }
        if previous.as_deref() != staff_id {
            if let Some(previous) = previous.as_deref() {
                self.tracker.release_allocation(previous, role);
            }
            if let Some(staff_id) = staff_id {
                self.tracker.record_allocation(staff_id, role);
            }
        }
        tracing::debug!(
            student = %doc_id,
            staff = staff_id.unwrap_or("-"),
            %role,
            "assigned"
        );
        Ok(())
    }

    /// Students still missing each role.
    #[must_use]
    pub fn residual(&self) -> Residual {
        let count = |role| u32::try_from(self.roster.missing(role)).unwrap_or(u32::MAX);
        Residual {
            supervisor: count(Role::Supervisor),
            moderator: count(Role::Moderator),
        }
    }

    /// Stamp residual counts onto a finished report and log its summary.
    #[must_use]
    pub fn conclude(&self, mut report: AllocationReport) -> AllocationReport {
        report.residual = self.residual();
        tracing::info!(
            strategy = %report.strategy,
            succeeded = report.succeeded,
            failed = report.failed,
            skipped = report.skipped,
            residual_supervisor = report.residual.supervisor,
            residual_moderator = report.residual.moderator,
            "allocation run finished"
        );
        report
    }
}
