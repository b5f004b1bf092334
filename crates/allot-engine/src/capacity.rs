//! Per-staff, per-role allocation counters for one run.

use std::collections::HashMap;

use allot_core::enums::Role;
use allot_core::responses::CapacityRow;

use crate::roster::Roster;

/// Allocation counts seeded from the roster and kept current in memory.
///
/// Every quota decision within a run reads these counters; the store is never
/// re-queried for totals.
#[derive(Debug, Clone, Default)]
pub struct CapacityTracker {
    quotas: HashMap<String, u32>,
    supervisor: HashMap<String, u32>,
    moderator: HashMap<String, u32>,
}

impl CapacityTracker {
    /// Resolve every staff member's quota and count current holders.
    ///
    /// Role fields pointing at IDs that match no staff member are ignored.
    #[must_use]
    pub fn seed(roster: &Roster) -> Self {
        let mut tracker = Self {
            quotas: roster
                .staff()
                .iter()
                .map(|staff| (staff.id.clone(), roster.quota_of(&staff.id)))
                .collect(),
            ..Self::default()
        };
        for student in roster.students() {
            for role in Role::ALL {
                if let Some(staff_id) = student.holder(role) {
                    tracker.record_allocation(staff_id, role);
                }
            }
        }
        tracker
    }

    fn counts(&self, role: Role) -> &HashMap<String, u32> {
        match role {
            Role::Supervisor => &self.supervisor,
            Role::Moderator => &self.moderator,
        }
    }

    fn counts_mut(&mut self, role: Role) -> &mut HashMap<String, u32> {
        match role {
            Role::Supervisor => &mut self.supervisor,
            Role::Moderator => &mut self.moderator,
        }
    }

    #[must_use]
    pub fn quota(&self, staff_id: &str) -> Option<u32> {
        self.quotas.get(staff_id).copied()
    }

    #[must_use]
    pub fn count_for(&self, staff_id: &str, role: Role) -> u32 {
        self.counts(role).get(staff_id).copied().unwrap_or(0)
    }

    /// Supervisions plus moderations.
    #[must_use]
    pub fn total_for(&self, staff_id: &str) -> u32 {
        self.count_for(staff_id, Role::Supervisor) + self.count_for(staff_id, Role::Moderator)
    }

    /// Quota minus current count. Negative once an override has pushed the
    /// staff member past quota; zero for unknown staff.
    #[must_use]
    pub fn remaining_capacity(&self, staff_id: &str, role: Role) -> i64 {
        self.quota(staff_id).map_or(0, |quota| {
            i64::from(quota) - i64::from(self.count_for(staff_id, role))
        })
    }

    #[must_use]
    pub fn has_capacity(&self, staff_id: &str, role: Role) -> bool {
        self.remaining_capacity(staff_id, role) > 0
    }

    /// Whether any tracked staff member can still take `role`.
    #[must_use]
    pub fn any_capacity(&self, role: Role) -> bool {
        self.quotas.keys().any(|id| self.has_capacity(id, role))
    }

    /// Share of the quota still free, used to spread load. Zero when the
    /// quota is zero or the staff member is unknown.
    #[must_use]
    pub fn remaining_fraction(&self, staff_id: &str, role: Role) -> f64 {
        match self.quota(staff_id) {
            Some(quota) if quota > 0 => {
                let quota = f64::from(quota);
                (quota - f64::from(self.count_for(staff_id, role))) / quota
            }
            _ => 0.0,
        }
    }

    /// Count one more allocation. Unknown staff IDs are not tracked.
    pub fn record_allocation(&mut self, staff_id: &str, role: Role) {
        if !self.quotas.contains_key(staff_id) {
            return;
        }
        *self.counts_mut(role).entry(staff_id.to_string()).or_insert(0) += 1;
    }

    /// Count one fewer allocation, saturating at zero.
    pub fn release_allocation(&mut self, staff_id: &str, role: Role) {
        if let Some(count) = self.counts_mut(role).get_mut(staff_id) {
            *count = count.saturating_sub(1);
        }
    }

    /// Remaining-quota table, one row per staff member sorted by name.
    #[must_use]
    pub fn summary(&self, roster: &Roster) -> Vec<CapacityRow> {
        let mut rows: Vec<CapacityRow> = roster
            .staff()
            .iter()
            .map(|staff| {
                let quota = self.quota(&staff.id).unwrap_or(0);
                let supervisor = self.count_for(&staff.id, Role::Supervisor);
                let moderator = self.count_for(&staff.id, Role::Moderator);
                CapacityRow {
                    staff_id: staff.id.clone(),
                    full_name: staff.full_name.clone(),
                    email: staff.email.clone(),
                    quota,
                    supervisor_allocations: supervisor,
                    remaining_supervisor: quota.saturating_sub(supervisor),
                    moderator_allocations: moderator,
                    remaining_moderator: quota.saturating_sub(moderator),
                }
            })
            .collect();
        rows.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        rows
    }
}

#[cfg(test)]
mod tests {
    use allot_core::entities::{StaffMember, Student};
    use pretty_assertions::assert_eq;

    use super::*;

    fn roster() -> Roster {
        let staff = |id: &str, name: &str, quota: u32| StaffMember {
            id: id.into(),
            full_name: name.into(),
            quota,
            ..StaffMember::default()
        };
        let student = |id: &str, sup: Option<&str>, modr: Option<&str>| Student {
            id: id.into(),
            student_id: id.to_uppercase(),
            supervisor: sup.map(String::from),
            moderator: modr.map(String::from),
            ..Student::default()
        };
        Roster::from_parts(
            vec![
                student("s1", Some("stf-z"), Some("stf-a")),
                student("s2", Some("stf-z"), None),
                student("s3", Some("stf-ghost"), Some("")),
            ],
            vec![staff("stf-z", "Zed", 2), staff("stf-a", "Amy", 4)],
            vec![],
            vec![],
            5,
        )
    }

    #[test]
    fn seed_counts_known_holders_only() {
        let tracker = CapacityTracker::seed(&roster());
        assert_eq!(tracker.count_for("stf-z", Role::Supervisor), 2);
        assert_eq!(tracker.count_for("stf-a", Role::Moderator), 1);
        assert_eq!(tracker.count_for("stf-ghost", Role::Supervisor), 0);
        assert_eq!(tracker.total_for("stf-a"), 1);
    }

    #[test]
    fn capacity_is_per_role() {
        let tracker = CapacityTracker::seed(&roster());
        assert!(!tracker.has_capacity("stf-z", Role::Supervisor));
        assert!(tracker.has_capacity("stf-z", Role::Moderator));
        assert_eq!(tracker.remaining_capacity("stf-z", Role::Moderator), 2);
        assert!(!tracker.has_capacity("stf-ghost", Role::Supervisor));
    }

    #[test]
    fn any_capacity_looks_across_staff() {
        let mut tracker = CapacityTracker::seed(&roster());
        assert!(tracker.any_capacity(Role::Supervisor));
        for _ in 0..4 {
            tracker.record_allocation("stf-a", Role::Supervisor);
        }
        assert!(!tracker.any_capacity(Role::Supervisor));
        assert!(tracker.any_capacity(Role::Moderator));
        assert!(!CapacityTracker::default().any_capacity(Role::Moderator));
    }

    #[test]
    fn record_and_release_adjust_counts() {
        let mut tracker = CapacityTracker::seed(&roster());
        tracker.record_allocation("stf-z", Role::Supervisor);
        assert_eq!(tracker.remaining_capacity("stf-z", Role::Supervisor), -1);

        tracker.release_allocation("stf-z", Role::Supervisor);
        tracker.release_allocation("stf-z", Role::Supervisor);
        tracker.release_allocation("stf-z", Role::Supervisor);
        tracker.release_allocation("stf-z", Role::Supervisor);
        assert_eq!(tracker.count_for("stf-z", Role::Supervisor), 0);
    }

    #[test]
    fn fraction_spreads_load() {
        let tracker = CapacityTracker::seed(&roster());
        assert!((tracker.remaining_fraction("stf-a", Role::Moderator) - 0.75).abs() < f64::EPSILON);
        assert!(tracker.remaining_fraction("stf-z", Role::Supervisor).abs() < f64::EPSILON);
        assert!(tracker.remaining_fraction("stf-ghost", Role::Supervisor).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_is_sorted_by_name() {
        let tracker = CapacityTracker::seed(&roster());
        let rows = tracker.summary(&roster());
        assert_eq!(rows[0].full_name, "Amy");
        assert_eq!(rows[0].remaining_moderator, 3);
        assert_eq!(rows[1].full_name, "Zed");
        assert_eq!(rows[1].remaining_supervisor, 0);
        assert_eq!(rows[1].remaining_moderator, 2);
    }
}
