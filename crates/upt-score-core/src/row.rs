//! Row view used when scanning a sheet in reading order

use crate::cell::CellValue;

/// One populated row of a worksheet, as yielded by
/// [`Worksheet::rows`](crate::Worksheet::rows)
#[derive(Debug)]
pub struct RowData<'a> {
    /// Row index (0-based)
    pub index: u32,
    /// Non-empty cells in ascending column order
    pub cells: Vec<(u16, &'a CellValue)>,
}

impl<'a> RowData<'a> {
    /// Create a new row data
    pub fn new(index: u32, cells: Vec<(u16, &'a CellValue)>) -> Self {
        Self { index, cells }
    }

    /// Get a cell by column index
    pub fn cell(&self, col: u16) -> Option<&'a CellValue> {
        self.cells
            .iter()
            .find(|(c, _)| *c == col)
            .map(|(_, value)| *value)
    }

    /// Cells strictly to the right of `col`, left to right
    pub fn cells_after(&self, col: u16) -> impl Iterator<Item = (u16, &'a CellValue)> + '_ {
        self.cells
            .iter()
            .filter(move |(c, _)| *c > col)
            .map(|(c, value)| (*c, *value))
    }

    /// Check if row has any cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells in row
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
