//! Literal column headers for every import form.
//!
//! The strings match the exported spreadsheet forms character for character,
//! including punctuation and trailing periods.

pub const SELF_REPORT_AGREEMENT: &str = "I agree to supervise / moderate this project";
pub const SELF_REPORT_ROLE: &str = "Supervisor or Moderator?";
pub const SELF_REPORT_STUDENT_ID: &str = "Student's ID (without 'UP')";
pub const SELF_REPORT_STAFF_NAME: &str = "Supervisor's / Moderator's name";

pub const CHOICE_TIMESTAMP: &str = "Timestamp";
pub const CHOICE_STUDENT_ID: &str = "Student ID number (INCLUDING 'UP')";
pub const CHOICE_FIRST: &str = "First Supervisor Choice";
pub const CHOICE_SECOND: &str = "Second Supervisor Choice";
pub const CHOICE_THIRD: &str = "Third Supervisor Choice";
pub const CHOICE_TOPIC: &str = "Project Topic.";

pub const STAFF_FULL_NAME: &str = "Full Name";
pub const STAFF_EMAIL: &str = "Email";
pub const STAFF_QUOTA: &str = "Quota";
pub const STAFF_AVOID: &str = "Avoid";
pub const STAFF_INTERESTS: &str = "Interests";
pub const STAFF_PROJECT_IDEAS: &str = "Project Ideas";

pub const STUDENT_ID: &str = "studentID";
pub const STUDENT_FIRST_NAME: &str = "First name";
pub const STUDENT_SURNAME: &str = "Surname";
pub const STUDENT_COURSE_CODE: &str = "Course code";
pub const STUDENT_EMAIL: &str = "Email";
pub const STUDENT_SUPERVISOR: &str = "Supervisor";
pub const STUDENT_MODERATOR: &str = "Moderator";

/// The import forms understood by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    SelfReport,
    StudentChoice,
    Staff,
    Quota,
    Interests,
    Students,
}

impl Form {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SelfReport => "self-report",
            Self::StudentChoice => "student-choice",
            Self::Staff => "staff",
            Self::Quota => "quota",
            Self::Interests => "interests",
            Self::Students => "students",
        }
    }

    /// Columns that must be present for the form to be parsed at all.
    #[must_use]
    pub const fn required_headers(self) -> &'static [&'static str] {
        match self {
            Self::SelfReport => &[
                SELF_REPORT_AGREEMENT,
                SELF_REPORT_ROLE,
                SELF_REPORT_STUDENT_ID,
                SELF_REPORT_STAFF_NAME,
            ],
            Self::StudentChoice => &[CHOICE_STUDENT_ID, CHOICE_FIRST],
            Self::Staff => &[STAFF_FULL_NAME, STAFF_EMAIL],
            Self::Quota => &[STAFF_FULL_NAME, STAFF_QUOTA],
            Self::Interests => &[STAFF_FULL_NAME],
            Self::Students => &[STUDENT_ID],
        }
    }
}
