//! CSV serialization of export rows.

use std::io;

use serde::Serialize;

use crate::error::TabularError;

/// Write `rows` as CSV with a header line taken from the row type's field names.
///
/// An empty slice writes nothing.
///
/// # Errors
///
/// Returns `TabularError` if serialization or the underlying write fails.
pub fn write_csv<W: io::Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), TabularError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render `rows` as a CSV string.
///
/// # Errors
///
/// Returns `TabularError` if serialization fails.
pub fn to_csv_string<T: Serialize>(rows: &[T]) -> Result<String, TabularError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows)?;
    String::from_utf8(buf).map_err(|e| TabularError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
