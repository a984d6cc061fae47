//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error (malformed quoting, invalid UTF-8, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Record or field beyond the last row or column a sheet can hold
    #[error("Record {record} field {field} does not fit in a worksheet")]
    OutOfSheet { record: usize, field: usize },

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] upt_score_core::Error),
}
