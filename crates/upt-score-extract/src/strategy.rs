//! Score lookup strategies
//!
//! A strategy looks at one worksheet and either finds a number or doesn't.
//! [`ScoreExtractor`](crate::ScoreExtractor) tries them in order.

use std::fmt;

use upt_score_core::{CellAddress, CellValue, Worksheet};

/// A number found on a sheet, with where it was found
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatedScore {
    pub value: f64,
    pub address: CellAddress,
}

/// One way of finding the total score on a sheet
pub trait ScoreStrategy: fmt::Debug + Send + Sync {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Look for the score; `None` hands over to the next strategy
    fn locate(&self, sheet: &Worksheet) -> Option<LocatedScore>;
}

/// Only genuine numbers count as a score. Booleans and numeric-looking text
/// do not; a formula counts through its cached number.
fn numeric(value: &CellValue) -> Option<f64> {
    value.as_number().filter(|n| n.is_finite())
}

/// Read a single well-known cell
#[derive(Debug, Clone, PartialEq)]
pub struct FixedCell {
    address: CellAddress,
}

impl FixedCell {
    pub fn new(address: CellAddress) -> Self {
        Self { address }
    }

    pub fn address(&self) -> CellAddress {
        self.address
    }
}

impl ScoreStrategy for FixedCell {
    fn name(&self) -> &'static str {
        "fixed-cell"
    }

    fn locate(&self, sheet: &Worksheet) -> Option<LocatedScore> {
        let value = numeric(sheet.cell_at_address(self.address)?)?;
        Some(LocatedScore {
            value,
            address: self.address,
        })
    }
}

/// Find a label cell and take the first number to its right.
///
/// Rows are scanned top to bottom and cells left to right. The scan ends at
/// the first row holding the label, whether or not a number follows it there.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScan {
    label: String,
}

impl LabelScan {
    /// `label` is compared against trimmed, lower-cased cell text
    pub fn new<S: AsRef<str>>(label: S) -> Self {
        Self {
            label: label.as_ref().trim().to_lowercase(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn is_label(&self, value: &CellValue) -> bool {
        value
            .as_string()
            .map_or(false, |text| text.trim().to_lowercase() == self.label)
    }
}

impl ScoreStrategy for LabelScan {
    fn name(&self) -> &'static str {
        "label-scan"
    }

    fn locate(&self, sheet: &Worksheet) -> Option<LocatedScore> {
        for row in sheet.rows() {
            let Some(label_col) = row
                .cells
                .iter()
                .find(|(_, value)| self.is_label(value))
                .map(|(col, _)| *col)
            else {
                continue;
            };

            let found = row.cells_after(label_col).find_map(|(col, value)| {
                numeric(value).map(|value| LocatedScore {
                    value,
                    address: CellAddress::new(row.index, col),
                })
            });

            if found.is_none() {
                tracing::debug!(
                    "'{}' label at {} has no number after it; not scanning further rows",
                    self.label,
                    CellAddress::new(row.index, label_col)
                );
            }
            return found;
        }

        None
    }
}
