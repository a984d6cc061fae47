//! Batch score reports
//!
//! One row per uploaded file, compared against an optional target score.

use upt_score_core::{CellValue, Result as CoreResult, Worksheet};
use upt_score_extract::{ExtractError, ExtractionResult, NotFoundReason};

/// Header row of [`ScoreReport::to_worksheet`]
pub const REPORT_HEADER: [&str; 6] = ["source", "sheet", "status", "score", "target", "attainment_pct"];

/// What happened to one upload
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Extracted(ExtractionResult),
    /// The upload could not be decoded; holds the error message
    Malformed(String),
}

/// Report row status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Found,
    NotPositive,
    SheetMissing,
    ValueMissing,
    Malformed,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Found => "found",
            EntryStatus::NotPositive => "not-positive",
            EntryStatus::SheetMissing => "sheet-missing",
            EntryStatus::ValueMissing => "value-missing",
            EntryStatus::Malformed => "malformed",
        }
    }
}

/// One uploaded file
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    /// File name or path the upload came from
    pub source: String,
    /// Sheet name that was requested
    pub sheet: String,
    pub outcome: EntryOutcome,
}

impl ReportEntry {
    pub fn score(&self) -> Option<f64> {
        match &self.outcome {
            EntryOutcome::Extracted(result) => result.score(),
            EntryOutcome::Malformed(_) => None,
        }
    }
}

/// Scores collected over a batch of uploads
#[derive(Debug, Clone, Default)]
pub struct ScoreReport {
    entries: Vec<ReportEntry>,
    target: Option<f64>,
    require_positive: bool,
}

impl ScoreReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare found scores against `target`
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// Mark found scores that are not greater than zero as `not-positive`
    pub fn with_require_positive(mut self, require_positive: bool) -> Self {
        self.require_positive = require_positive;
        self
    }

    pub fn target(&self) -> Option<f64> {
        self.target
    }

    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// Record the outcome of an extraction call. Decoding failures become
    /// `malformed` rows instead of aborting the batch.
    pub fn record<S, T>(&mut self, source: S, sheet: T, outcome: Result<ExtractionResult, ExtractError>)
    where
        S: Into<String>,
        T: Into<String>,
    {
        let source = source.into();
        let outcome = match outcome {
            Ok(result) => EntryOutcome::Extracted(result),
            Err(err) => {
                tracing::warn!("{}: {}", source, err);
                EntryOutcome::Malformed(err.to_string())
            }
        };
        self.push(ReportEntry {
            source,
            sheet: sheet.into(),
            outcome,
        });
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn status(&self, entry: &ReportEntry) -> EntryStatus {
        match &entry.outcome {
            EntryOutcome::Malformed(_) => EntryStatus::Malformed,
            EntryOutcome::Extracted(result) => match (result.score(), result.reason()) {
                (Some(score), _) if self.require_positive && score <= 0.0 => {
                    EntryStatus::NotPositive
                }
                (Some(_), _) => EntryStatus::Found,
                (None, Some(NotFoundReason::SheetMissing)) => EntryStatus::SheetMissing,
                (None, _) => EntryStatus::ValueMissing,
            },
        }
    }

    /// Number of uploads a score was found in (including non-positive ones)
    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|e| e.score().is_some()).count()
    }

    /// Mean of all found scores
    pub fn mean_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self.entries.iter().filter_map(ReportEntry::score).collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }

    /// Whether the entry's score reaches the target. `None` without a
    /// target or a score.
    pub fn meets_target(&self, entry: &ReportEntry) -> Option<bool> {
        Some(entry.score()? >= self.target?)
    }

    /// Score as a percentage of the target. `None` without a score or a
    /// positive target.
    pub fn attainment_pct(&self, entry: &ReportEntry) -> Option<f64> {
        let target = self.target.filter(|t| *t > 0.0)?;
        Some(entry.score()? * 100.0 / target)
    }

    /// Lay the report out as a sheet, header in row 1
    pub fn to_worksheet(&self) -> CoreResult<Worksheet> {
        let mut sheet = Worksheet::new("Report");
        for (col, title) in REPORT_HEADER.iter().enumerate() {
            sheet.set_cell_value_at(0, col as u16, *title)?;
        }

        for (i, entry) in self.entries.iter().enumerate() {
            let row = i as u32 + 1;
            let cells: [CellValue; 6] = [
                entry.source.as_str().into(),
                entry.sheet.as_str().into(),
                self.status(entry).as_str().into(),
                entry.score().map_or(CellValue::Empty, CellValue::Number),
                self.target.map_or(CellValue::Empty, CellValue::Number),
                self.attainment_pct(entry)
                    .map_or(CellValue::Empty, |pct| CellValue::Number((pct * 100.0).round() / 100.0)),
            ];
            for (col, value) in cells.into_iter().enumerate() {
                sheet.set_cell_value_at(row, col as u16, value)?;
            }
        }
        Ok(sheet)
    }
}
