//! # upt-score-extract
//!
//! Reads the "total score" a unit reports in its workbook.
//!
//! The sheet named after the unit is located ignoring case, then an ordered
//! list of [`ScoreStrategy`] values is tried until one yields a number:
//!
//! 1. [`FixedCell`] at `D13`, where the report template puts the total.
//! 2. [`LabelScan`] for a cell reading `Total Score`, taking the first number
//!    to its right on the same row.
//!
//! Missing sheets and missing values are ordinary outcomes and come back as
//! [`ExtractionResult`] variants, never as errors.
//!
//! ```rust
//! use upt_score_core::Workbook;
//! use upt_score_extract::{extract_score, ExtractionResult};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A5", "Total Score").unwrap();
//! sheet.set_cell_value("B5", 77.0).unwrap();
//!
//! let result = extract_score(&workbook, "SHEET1");
//! assert_eq!(result.score(), Some(77.0));
//!
//! assert!(matches!(
//!     extract_score(&workbook, "UPT Medan"),
//!     ExtractionResult::SheetNotFound { .. }
//! ));
//! ```

pub mod error;
pub mod extractor;
pub mod options;
pub mod result;
pub mod strategy;

pub use error::{ExtractError, ExtractResult};
pub use extractor::ScoreExtractor;
pub use options::ExtractOptions;
pub use result::{ExtractionResult, FoundScore, NotFoundReason};
pub use strategy::{FixedCell, LabelScan, LocatedScore, ScoreStrategy};

use upt_score_core::Workbook;

/// Extract the total score from `target_sheet_name` using the default
/// template layout (`D13`, then a `Total Score` label scan).
pub fn extract_score(workbook: &Workbook, target_sheet_name: &str) -> ExtractionResult {
    ScoreExtractor::new().extract(workbook, target_sheet_name)
}
