//! Tabular adapter error types.

use thiserror::Error;

/// Errors that make an import source unusable as a whole.
#[derive(Debug, Error)]
pub enum TabularError {
    /// The text is not well-formed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A form lacks one of its required header columns.
    #[error("{form} form is missing required column '{header}'")]
    MissingHeader {
        form: &'static str,
        header: &'static str,
    },

    /// Writing serialized output failed.
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),
}
