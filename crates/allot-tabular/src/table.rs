//! Header-keyed records read from CSV text.

use std::collections::HashMap;
use std::io;

use crate::error::TabularError;
use crate::headers::Form;

/// One data row. `row` is the spreadsheet row number (the header is row 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub row: usize,
    cells: Vec<String>,
}

/// A parsed CSV source: header positions plus data rows in file order.
#[derive(Debug, Clone, Default)]
pub struct Table {
    index: HashMap<String, usize>,
    rows: Vec<Record>,
}

impl Table {
    /// Read CSV text. Cells and headers are trimmed; blank rows are dropped.
    ///
    /// # Errors
    ///
    /// Returns `TabularError::Csv` if the text is not well-formed CSV.
    pub fn read<R: io::Read>(reader: R) -> Result<Self, TabularError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut index = HashMap::new();
        for (pos, header) in rdr.headers()?.iter().enumerate() {
            let header = header.trim_start_matches('\u{feff}').trim();
            index.entry(header.to_string()).or_insert(pos);
        }

        let mut rows = Vec::new();
        for (offset, result) in rdr.records().enumerate() {
            let record = result?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            rows.push(Record {
                row: offset + 2,
                cells: record.iter().map(String::from).collect(),
            });
        }
        tracing::debug!(columns = index.len(), rows = rows.len(), "read CSV table");
        Ok(Self { index, rows })
    }

    #[must_use]
    pub fn has_header(&self, header: &str) -> bool {
        self.index.contains_key(header)
    }

    /// Fail on the first required header of `form` that is absent.
    ///
    /// # Errors
    ///
    /// Returns `TabularError::MissingHeader` naming the missing column.
    pub fn require(&self, form: Form) -> Result<(), TabularError> {
        match form
            .required_headers()
            .iter()
            .find(|header| !self.has_header(header))
        {
            Some(&header) => Err(TabularError::MissingHeader {
                form: form.name(),
                header,
            }),
            None => Ok(()),
        }
    }

    /// Cell under `header` for `record`; empty when the column or cell is absent.
    #[must_use]
    pub fn cell<'a>(&self, record: &'a Record, header: &str) -> &'a str {
        self.index
            .get(header)
            .and_then(|&pos| record.cells.get(pos))
            .map_or("", String::as_str)
    }

    /// Non-empty cell under `header`, if any.
    #[must_use]
    pub fn opt_cell(&self, record: &Record, header: &str) -> Option<String> {
        let value = self.cell(record, header);
        (!value.is_empty()).then(|| value.to_string())
    }

    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reads_trimmed_cells_by_header() {
        let table = Table::read(" Full Name , Email\nA. Smith , a@x.ac.uk\n".as_bytes()).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.row, 2);
        assert_eq!(table.cell(row, "Full Name"), "A. Smith");
        assert_eq!(table.cell(row, "Email"), "a@x.ac.uk");
        assert_eq!(table.cell(row, "Quota"), "");
        assert_eq!(table.opt_cell(row, "Quota"), None);
    }

    #[test]
    fn short_rows_and_blank_rows_are_tolerated() {
        let table = Table::read("a,b,c\n1\n,,\n4,5,6\n".as_bytes()).unwrap();
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.cell(&table.rows()[0], "c"), "");
        assert_eq!(table.rows()[1].row, 4);
    }

    #[test]
    fn byte_order_mark_is_stripped_from_first_header() {
        let table = Table::read("\u{feff}studentID,Surname\nUP1,Doe\n".as_bytes()).unwrap();
        assert!(table.has_header("studentID"));
    }

    #[test]
    fn require_names_missing_header() {
        let table = Table::read("Full Name\nA\n".as_bytes()).unwrap();
        let err = table.require(Form::Quota).unwrap_err();
        assert!(matches!(
            err,
            TabularError::MissingHeader { form: "quota", header: "Quota" }
        ));
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let table = Table::read("Full Name,Avoid\n\"Smith, A\",\"B, C\"\n".as_bytes()).unwrap();
        assert_eq!(table.cell(&table.rows()[0], "Avoid"), "B, C");
    }
}
