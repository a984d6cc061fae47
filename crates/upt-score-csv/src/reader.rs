//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use upt_score_core::{CellValue, StringPool, Workbook, Worksheet, MAX_COLS, MAX_ROWS};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a worksheet
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        // Headers are handled here rather than by the csv crate so that the
        // header record keeps its place in row 1.
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new(options.sheet_name.as_str());
        let mut pool = StringPool::new();

        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let is_header = options.has_header && row_idx == 0;

            for (col, field) in record.iter().enumerate() {
                let value = if options.auto_detect_types && !is_header {
                    Self::detect_type(field, &mut pool)
                } else if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::String(pool.intern(field))
                };

                let row = u32::try_from(row_idx).ok().filter(|r| *r < MAX_ROWS);
                let col_idx = u16::try_from(col).ok().filter(|c| *c < MAX_COLS);
                let (Some(row), Some(col_idx)) = (row, col_idx) else {
                    return Err(CsvError::OutOfSheet {
                        record: row_idx + 1,
                        field: col + 1,
                    });
                };

                worksheet.set_cell_value_at(row, col_idx, value)?;
            }
        }

        log::debug!(
            "Read {} cell(s) into sheet '{}'",
            worksheet.cell_count(),
            worksheet.name()
        );

        Ok(worksheet)
    }

    /// Read CSV into a single-sheet workbook
    pub fn read_workbook<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Workbook> {
        let worksheet = Self::read(reader, options)?;
        let mut workbook = Workbook::empty();
        workbook.add_existing_worksheet(worksheet)?;
        Ok(workbook)
    }

    /// Detect the type of a field value
    ///
    /// Only unambiguous spellings are converted: `1` stays the number one,
    /// never `TRUE`.
    fn detect_type(field: &str, pool: &mut StringPool) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        // "inf"/"NaN" parse as f64 but are words in a report
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }

        CellValue::String(pool.intern(field))
    }
}
