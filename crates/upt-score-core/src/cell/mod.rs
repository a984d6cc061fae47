//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "D13")
//! - [`CellRange`] - A range of cells (e.g., "A1:D13")
//! - [`CellStorage`] - Sparse row-major storage behind a worksheet

mod address;
mod storage;
mod value;

pub use address::{CellAddress, CellRange};
pub use storage::CellStorage;
pub use value::{CellError, CellValue, SharedString, StringPool};
