//! # allot-tabular
//!
//! CSV adapter for Allot: reads import forms into typed rows and writes
//! export rows back out.
//!
//! Column headers are load-bearing and live in one place, [`headers`]. A form
//! missing a required header is rejected before any row is looked at.

pub mod error;
pub mod export;
pub mod forms;
pub mod headers;
pub mod table;

pub use error::TabularError;
pub use export::{to_csv_string, write_csv};
pub use forms::{
    ChoiceForm, ChoiceRow, InterestRow, QuotaRow, SelfReportRow, StaffRow, StudentRow,
    read_interests, read_quotas, read_self_report, read_staff, read_student_choice,
    read_students, split_list,
};
