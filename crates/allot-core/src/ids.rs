//! Document ID prefixes.
//!
//! Student and staff documents get generated IDs of the form `{prefix}-{8 hex}`.
//! Quota and interest records reuse the staff member's ID as their document ID.

pub const PREFIX_STUDENT: &str = "stu";
pub const PREFIX_STAFF: &str = "stf";

pub const ALL_PREFIXES: &[&str] = &[PREFIX_STUDENT, PREFIX_STAFF];
