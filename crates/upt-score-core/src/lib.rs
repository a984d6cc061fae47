//! # upt-score-core
//!
//! Core data structures for reading unit report workbooks.
//!
//! This crate provides the types the decoders fill in and the score
//! extractor reads:
//! - [`CellValue`] - Represents cell values (numbers, strings, booleans, errors, formulas)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`Workbook`], [`Worksheet`] - The document structures
//!
//! ## Example
//!
//! ```rust
//! use upt_score_core::{Workbook, CellValue};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! // Using string addresses
//! sheet.set_cell_value("C13", "Total Score").unwrap();
//! sheet.set_cell_value("D13", 87.5).unwrap();
//!
//! // Or using row/column indices (0-based)
//! sheet.set_cell_value_at(0, 0, CellValue::string("UPT Bandung")).unwrap();
//!
//! assert!(workbook.worksheet_by_name_ignore_case("SHEET1").is_some());
//! ```

pub mod cell;
pub mod error;
pub mod row;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellError, CellRange, CellValue, SharedString, StringPool};
pub use error::{Error, Result};
pub use row::RowData;
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
