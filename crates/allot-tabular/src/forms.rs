//! Typed rows for each import form.
//!
//! Parsing only maps columns to fields. Whether a row is usable (an empty
//! student ID, an unknown role tag, a name that matches no one) is decided by
//! the engine so that it can be tallied per row.

use std::io;

use crate::error::TabularError;
use crate::headers::{self as h, Form};
use crate::table::Table;

/// One staff self-report submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfReportRow {
    pub row: usize,
    pub agreement: String,
    pub role: String,
    pub student_id: String,
    pub staff_name: String,
}

/// One student preference submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceRow {
    pub row: usize,
    pub timestamp: Option<String>,
    pub student_id: String,
    /// First, second, and third choice in rank order; blanks are kept.
    pub choices: [String; 3],
    pub topic: Option<String>,
}

/// Student-choice rows plus whether the source carried a timestamp column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceForm {
    pub has_timestamp: bool,
    pub rows: Vec<ChoiceRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffRow {
    pub row: usize,
    pub full_name: String,
    pub email: String,
    /// `None` when the column is absent, blank, or not a whole number.
    pub quota: Option<u32>,
    pub avoid: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaRow {
    pub row: usize,
    pub full_name: String,
    /// Raw cell; the engine rejects values that are not whole numbers.
    pub quota: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestRow {
    pub row: usize,
    pub full_name: String,
    pub interests: Vec<String>,
    pub project_ideas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub row: usize,
    pub student_id: String,
    pub first_name: String,
    pub surname: String,
    pub course_code: Option<String>,
    pub email: Option<String>,
    pub supervisor: Option<String>,
    pub moderator: Option<String>,
}

/// Split a comma-separated cell into trimmed, non-empty entries.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn open<R: io::Read>(reader: R, form: Form) -> Result<Table, TabularError> {
    let table = Table::read(reader)?;
    table.require(form)?;
    Ok(table)
}

/// # Errors
///
/// Returns `TabularError` on malformed CSV or a missing required header.
pub fn read_self_report<R: io::Read>(reader: R) -> Result<Vec<SelfReportRow>, TabularError> {
    let table = open(reader, Form::SelfReport)?;
    Ok(table
        .rows()
        .iter()
        .map(|record| SelfReportRow {
            row: record.row,
            agreement: table.cell(record, h::SELF_REPORT_AGREEMENT).to_string(),
            role: table.cell(record, h::SELF_REPORT_ROLE).to_string(),
            student_id: table.cell(record, h::SELF_REPORT_STUDENT_ID).to_string(),
            staff_name: table.cell(record, h::SELF_REPORT_STAFF_NAME).to_string(),
        })
        .collect())
}

/// # Errors
///
/// Returns `TabularError` on malformed CSV or a missing required header.
pub fn read_student_choice<R: io::Read>(reader: R) -> Result<ChoiceForm, TabularError> {
    let table = open(reader, Form::StudentChoice)?;
    let rows = table
        .rows()
        .iter()
        .map(|record| ChoiceRow {
            row: record.row,
            timestamp: table.opt_cell(record, h::CHOICE_TIMESTAMP),
            student_id: table.cell(record, h::CHOICE_STUDENT_ID).to_string(),
            choices: [h::CHOICE_FIRST, h::CHOICE_SECOND, h::CHOICE_THIRD]
                .map(|header| table.cell(record, header).to_string()),
            topic: table.opt_cell(record, h::CHOICE_TOPIC),
        })
        .collect();
    Ok(ChoiceForm {
        has_timestamp: table.has_header(h::CHOICE_TIMESTAMP),
        rows,
    })
}

/// # Errors
///
/// Returns `TabularError` on malformed CSV or a missing required header.
pub fn read_staff<R: io::Read>(reader: R) -> Result<Vec<StaffRow>, TabularError> {
    let table = open(reader, Form::Staff)?;
    Ok(table
        .rows()
        .iter()
        .map(|record| StaffRow {
            row: record.row,
            full_name: table.cell(record, h::STAFF_FULL_NAME).to_string(),
            email: table.cell(record, h::STAFF_EMAIL).to_string(),
            quota: table.cell(record, h::STAFF_QUOTA).parse().ok(),
            avoid: split_list(table.cell(record, h::STAFF_AVOID)),
        })
        .collect())
}

/// # Errors
///
/// Returns `TabularError` on malformed CSV or a missing required header.
pub fn read_quotas<R: io::Read>(reader: R) -> Result<Vec<QuotaRow>, TabularError> {
    let table = open(reader, Form::Quota)?;
    Ok(table
        .rows()
        .iter()
        .map(|record| QuotaRow {
            row: record.row,
            full_name: table.cell(record, h::STAFF_FULL_NAME).to_string(),
            quota: table.cell(record, h::STAFF_QUOTA).to_string(),
        })
        .collect())
}

/// # Errors
///
/// Returns `TabularError` on malformed CSV or a missing required header.
pub fn read_interests<R: io::Read>(reader: R) -> Result<Vec<InterestRow>, TabularError> {
    let table = open(reader, Form::Interests)?;
    Ok(table
        .rows()
        .iter()
        .map(|record| InterestRow {
            row: record.row,
            full_name: table.cell(record, h::STAFF_FULL_NAME).to_string(),
            interests: split_list(table.cell(record, h::STAFF_INTERESTS)),
            project_ideas: split_list(table.cell(record, h::STAFF_PROJECT_IDEAS)),
        })
        .collect())
}

/// # Errors
///
/// Returns `TabularError` on malformed CSV or a missing required header.
pub fn read_students<R: io::Read>(reader: R) -> Result<Vec<StudentRow>, TabularError> {
    let table = open(reader, Form::Students)?;
    Ok(table
        .rows()
        .iter()
        .map(|record| StudentRow {
            row: record.row,
            student_id: table.cell(record, h::STUDENT_ID).to_string(),
            first_name: table.cell(record, h::STUDENT_FIRST_NAME).to_string(),
            surname: table.cell(record, h::STUDENT_SURNAME).to_string(),
            course_code: table.opt_cell(record, h::STUDENT_COURSE_CODE),
            email: table.opt_cell(record, h::STUDENT_EMAIL),
            supervisor: table.opt_cell(record, h::STUDENT_SUPERVISOR),
            moderator: table.opt_cell(record, h::STUDENT_MODERATOR),
        })
        .collect())
}
