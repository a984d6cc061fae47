//! Workbook type - the decoded upload

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// An ordered list of worksheets. Decoders build one per uploaded file; the
/// score extractor only ever reads it.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create a new workbook with one empty worksheet named `Sheet1`
    pub fn new() -> Self {
        Self {
            worksheets: vec![Worksheet::new("Sheet1")],
        }
    }

    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by exact name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get the first worksheet whose name equals `name` ignoring case.
    ///
    /// This is whole-name equality, not a substring match: `"sheet1"` finds
    /// `"Sheet1"` but not `"Sheet10"`.
    pub fn worksheet_by_name_ignore_case(&self, name: &str) -> Option<&Worksheet> {
        let wanted = name.to_lowercase();
        self.worksheets
            .iter()
            .find(|ws| ws.name().to_lowercase() == wanted)
    }

    /// Names of all worksheets, in workbook order
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.worksheets.iter().map(|ws| ws.name())
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet with specified name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.add_existing_worksheet(Worksheet::new(name))
    }

    /// Add an existing worksheet to the workbook
    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.validate_sheet_name(worksheet.name())?;
        let index = self.worksheets.len();
        self.worksheets.push(worksheet);
        Ok(index)
    }

    /// Append a worksheet read from an uploaded file, keeping its name as
    /// stored.
    ///
    /// Packages written by other tools may carry names Excel would refuse to
    /// create (over 31 characters, `:` or `[`, near-duplicates differing only
    /// by case). Their cells are still readable, so no name checks apply here.
    pub fn push_decoded_worksheet(&mut self, worksheet: Worksheet) -> usize {
        self.worksheets.push(worksheet);
        self.worksheets.len() - 1
    }

    /// Validate a sheet name the way spreadsheet applications do
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        if self.worksheet_by_name_ignore_case(name).is_some() {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new();
        assert_eq!(wb.sheet_count(), 1);
        assert_eq!(wb.worksheet(0).unwrap().name(), "Sheet1");
        assert!(Workbook::empty().is_empty());
    }

    #[test]
    fn test_add_worksheets() {
        let mut wb = Workbook::new();

        let idx = wb.add_worksheet_with_name("UPT Bandung").unwrap();
        assert_eq!(idx, 1);
        assert_eq!(wb.sheet_names().collect::<Vec<_>>(), vec!["Sheet1", "UPT Bandung"]);
    }

    #[test]
    fn test_duplicate_name() {
        let mut wb = Workbook::new();

        // Case-insensitive duplicate check
        assert!(wb.add_worksheet_with_name("SHEET1").is_err());
        assert!(wb.add_worksheet_with_name("sheet1").is_err());
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut wb = Workbook::new();

        assert!(wb.add_worksheet_with_name("").is_err());
        assert!(wb.add_worksheet_with_name("Sheet/1").is_err());
        assert!(wb.add_worksheet_with_name("Sheet:1").is_err());
        assert!(wb.add_worksheet_with_name("Sheet[1]").is_err());

        let long_name = "A".repeat(MAX_SHEET_NAME_LEN + 1);
        assert!(wb.add_worksheet_with_name(&long_name).is_err());
    }

    #[test]
    fn test_lookup_ignore_case_is_exact() {
        let mut wb = Workbook::empty();
        wb.add_worksheet_with_name("Sheet10").unwrap();
        wb.add_worksheet_with_name("Sheet1").unwrap();

        assert_eq!(wb.worksheet_by_name_ignore_case("SHEET1").unwrap().name(), "Sheet1");
        assert_eq!(wb.worksheet_by_name_ignore_case("sheet10").unwrap().name(), "Sheet10");
        assert!(wb.worksheet_by_name_ignore_case("Sheet").is_none());
        assert!(wb.worksheet_by_name("sheet1").is_none());
    }

    #[test]
    fn test_decoded_worksheets_skip_name_checks() {
        let mut wb = Workbook::new();

        let long_name = "UPT Bandung Laporan Kinerja Triwulan";
        assert_eq!(wb.push_decoded_worksheet(Worksheet::new(long_name)), 1);
        assert_eq!(wb.push_decoded_worksheet(Worksheet::new("SHEET1")), 2);
        assert_eq!(wb.push_decoded_worksheet(Worksheet::new("Q1: [draft]")), 3);

        assert_eq!(wb.sheet_count(), 4);
        assert_eq!(wb.worksheet_by_name_ignore_case(long_name).unwrap().name(), long_name);
        // The first of two case-insensitive matches wins
        assert_eq!(wb.worksheet_by_name_ignore_case("sheet1").unwrap().name(), "Sheet1");
    }
}
