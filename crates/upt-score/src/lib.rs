//! # upt-score
//!
//! Reads the total score a unit reports in its uploaded workbook.
//!
//! Uploads are decoded from XLSX or CSV into a [`Workbook`], and the score is
//! taken from the sheet named after the unit: cell `D13` when it holds a
//! number, otherwise the first number to the right of a `Total Score` label.
//!
//! ## Features
//!
//! - Decode `.xlsx` / `.xlsm` and `.csv` uploads (values only)
//! - Case-insensitive sheet lookup
//! - Pluggable lookup strategies ([`ScoreStrategy`])
//! - Batch reports against a target score ([`ScoreReport`])
//!
//! ## Example
//!
//! ```rust
//! use upt_score::prelude::*;
//!
//! let csv = b"Unit,UPT Bandung\nTotal Score,87.5\n";
//! let result = extract_from_bytes(csv, Some("bandung.csv"), "sheet1").unwrap();
//!
//! assert_eq!(result.score(), Some(87.5));
//! ```

pub mod decode;
pub mod prelude;
pub mod report;

pub use decode::{decode_workbook, DecodeError, DecodeResult, InputFormat};
pub use report::{EntryOutcome, EntryStatus, ReportEntry, ScoreReport, REPORT_HEADER};

// Re-export core types
pub use upt_score_core::{
    CellAddress, CellError, CellRange, CellValue, Error, Result, Workbook, Worksheet, MAX_COLS,
    MAX_ROWS, MAX_SHEET_NAME_LEN,
};

// Re-export extraction types
pub use upt_score_extract::{
    extract_score, ExtractError, ExtractOptions, ExtractResult, ExtractionResult, FixedCell,
    FoundScore, LabelScan, LocatedScore, NotFoundReason, ScoreExtractor, ScoreStrategy,
};

// Re-export I/O types
pub use upt_score_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
pub use upt_score_xlsx::{XlsxError, XlsxReader};

use std::path::Path;

impl From<DecodeError> for ExtractError {
    fn from(err: DecodeError) -> Self {
        ExtractError::malformed(err)
    }
}

/// Extension trait for Workbook to add file input
pub trait WorkbookExt {
    /// Open a workbook from a file
    fn open<P: AsRef<Path>>(path: P) -> DecodeResult<Workbook>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> DecodeResult<Workbook> {
        let path = path.as_ref();

        match InputFormat::from_path(path) {
            Some(InputFormat::Xlsx) => Ok(XlsxReader::read_file(path)?),
            Some(InputFormat::Csv) => {
                let file = std::fs::File::open(path)?;
                Ok(CsvReader::read_workbook(file, &decode::upload_csv_options())?)
            }
            None => {
                // Misnamed uploads still decode when the content is recognizable
                let bytes = std::fs::read(path)?;
                let name = path.to_string_lossy();
                decode_workbook(&bytes, Some(&*name))
            }
        }
    }
}

/// Decode an upload and extract the score from `target_sheet_name` with the
/// default template layout.
pub fn extract_from_bytes(
    bytes: &[u8],
    hint: Option<&str>,
    target_sheet_name: &str,
) -> ExtractResult<ExtractionResult> {
    extract_from_bytes_with(&ScoreExtractor::new(), bytes, hint, target_sheet_name)
}

/// [`extract_from_bytes`] with a configured extractor
pub fn extract_from_bytes_with(
    extractor: &ScoreExtractor,
    bytes: &[u8],
    hint: Option<&str>,
    target_sheet_name: &str,
) -> ExtractResult<ExtractionResult> {
    let workbook = decode_workbook(bytes, hint)?;
    Ok(extractor.extract(&workbook, target_sheet_name))
}

/// Read a file and extract the score from `target_sheet_name`
pub fn extract_from_path<P: AsRef<Path>>(
    path: P,
    target_sheet_name: &str,
) -> ExtractResult<ExtractionResult> {
    extract_from_path_with(&ScoreExtractor::new(), path, target_sheet_name)
}

/// [`extract_from_path`] with a configured extractor
pub fn extract_from_path_with<P: AsRef<Path>>(
    extractor: &ScoreExtractor,
    path: P,
    target_sheet_name: &str,
) -> ExtractResult<ExtractionResult> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let name = path.to_string_lossy();
    extract_from_bytes_with(extractor, &bytes, Some(&*name), target_sheet_name)
}
