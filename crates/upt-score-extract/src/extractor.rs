//! The score extractor

use tracing::debug;
use upt_score_core::{Workbook, Worksheet};

use crate::options::ExtractOptions;
use crate::result::{ExtractionResult, FoundScore};
use crate::strategy::{FixedCell, LabelScan, ScoreStrategy};

/// Tries an ordered list of strategies against the requested sheet; the first
/// one that yields a number wins.
///
/// The extractor holds no per-call state and can be shared across threads.
#[derive(Debug)]
pub struct ScoreExtractor {
    strategies: Vec<Box<dyn ScoreStrategy>>,
}

impl Default for ScoreExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreExtractor {
    /// Extractor for the standard report template
    pub fn new() -> Self {
        Self::with_options(&ExtractOptions::default())
    }

    /// Fixed cell first, then the label scan
    pub fn with_options(options: &ExtractOptions) -> Self {
        Self::from_strategies(vec![
            Box::new(FixedCell::new(options.fixed_cell)),
            Box::new(LabelScan::new(&options.label)),
        ])
    }

    /// Use exactly these strategies, in this order
    pub fn from_strategies(strategies: Vec<Box<dyn ScoreStrategy>>) -> Self {
        Self { strategies }
    }

    /// Append a strategy tried after the existing ones
    pub fn with_fallback<S: ScoreStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn strategies(&self) -> impl Iterator<Item = &dyn ScoreStrategy> {
        self.strategies.iter().map(|s| s.as_ref())
    }

    /// Extract the score from the sheet named `target_sheet_name`, compared
    /// ignoring case. The first matching sheet is used.
    pub fn extract(&self, workbook: &Workbook, target_sheet_name: &str) -> ExtractionResult {
        let Some(sheet) = workbook.worksheet_by_name_ignore_case(target_sheet_name) else {
            debug!(
                "no sheet named '{}' among {} sheet(s)",
                target_sheet_name,
                workbook.sheet_count()
            );
            return ExtractionResult::SheetNotFound {
                requested_sheet: target_sheet_name.to_string(),
            };
        };

        match self.extract_from_sheet(sheet) {
            Some(found) => ExtractionResult::Found(found),
            None => ExtractionResult::ValueNotFound {
                requested_sheet: target_sheet_name.to_string(),
            },
        }
    }

    /// Run the strategies against an already resolved sheet
    pub fn extract_from_sheet(&self, sheet: &Worksheet) -> Option<FoundScore> {
        for strategy in &self.strategies {
            match strategy.locate(sheet) {
                Some(located) => {
                    debug!(
                        "{}: score {} at '{}'!{}",
                        strategy.name(),
                        located.value,
                        sheet.name(),
                        located.address
                    );
                    return Some(FoundScore {
                        score: located.value,
                        sheet: sheet.name().to_string(),
                        address: located.address,
                        strategy: strategy.name(),
                    });
                }
                None => debug!("{}: nothing in '{}'", strategy.name(), sheet.name()),
            }
        }
        None
    }
}
