//! Extraction options

use upt_score_core::CellAddress;

/// Row 13, column D of the report template
pub const DEFAULT_SCORE_CELL: CellAddress = CellAddress::new(12, 3);

/// Label the fallback scan looks for (compared trimmed and lower-cased)
pub const DEFAULT_SCORE_LABEL: &str = "total score";

/// Where to look for the total score
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Cell read first
    pub fixed_cell: CellAddress,
    /// Label searched for when the fixed cell holds no number
    pub label: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            fixed_cell: DEFAULT_SCORE_CELL,
            label: DEFAULT_SCORE_LABEL.to_string(),
        }
    }
}

impl ExtractOptions {
    /// Set the fixed cell
    pub fn with_fixed_cell(mut self, address: CellAddress) -> Self {
        self.fixed_cell = address;
        self
    }

    /// Set the fallback label
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }
}
