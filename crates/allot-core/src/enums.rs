//! Roles, collections, strategies, and failure kinds.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A staff role held on behalf of a student. A student holds at most one
/// staff member per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Supervisor,
    Moderator,
}

impl Role {
    pub const ALL: [Self; 2] = [Self::Supervisor, Self::Moderator];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Supervisor => "supervisor",
            Self::Moderator => "moderator",
        }
    }

    /// Parse a free-text role tag, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything other than "supervisor" or "moderator".
    #[must_use]
    pub fn parse_tag(raw: &str) -> Option<Self> {
        let tag = raw.trim();
        if tag.eq_ignore_ascii_case("supervisor") {
            Some(Self::Supervisor)
        } else if tag.eq_ignore_ascii_case("moderator") {
            Some(Self::Moderator)
        } else {
            None
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Named document collections in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Students,
    Staff,
    StaffQuotas,
    StaffInterests,
}

impl Collection {
    /// Collection name as stored in the `documents` table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Staff => "staff",
            Self::StaffQuotas => "staffQuotas",
            Self::StaffInterests => "staffInterests",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// The four allocation procedures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Manual,
    SelfReport,
    StudentChoice,
    DefaultFill,
}

impl Strategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::SelfReport => "self_report",
            Self::StudentChoice => "student_choice",
            Self::DefaultFill => "default_fill",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FailureKind
// ---------------------------------------------------------------------------

/// Why a single row or student could not be allocated.
///
/// None of these abort a strategy; they are tallied in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A required field was missing or unparseable.
    Validation,
    /// The student or staff member could not be found.
    Lookup,
    /// No eligible staff member had remaining quota.
    CapacityExhausted,
    /// The store did not accept the write.
    Persistence,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Lookup => "lookup",
            Self::CapacityExhausted => "capacity_exhausted",
            Self::Persistence => "persistence",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
