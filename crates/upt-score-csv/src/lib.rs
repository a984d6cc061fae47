//! # upt-score-csv
//!
//! CSV reader and writer for upt-score. A CSV upload decodes into a
//! single-sheet workbook; batch reports are written back out as CSV.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
