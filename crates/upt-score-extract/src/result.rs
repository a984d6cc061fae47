//! Extraction outcomes

use std::fmt;

use serde::{Serialize, Serializer};
use upt_score_core::CellAddress;

/// A score that was found
#[derive(Debug, Clone, PartialEq)]
pub struct FoundScore {
    pub score: f64,
    /// Actual name of the sheet it came from
    pub sheet: String,
    pub address: CellAddress,
    /// [`ScoreStrategy::name`](crate::ScoreStrategy::name) of the strategy that found it
    pub strategy: &'static str,
}

/// Why no score was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    SheetMissing,
    ValueMissing,
}

impl NotFoundReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotFoundReason::SheetMissing => "sheet-missing",
            NotFoundReason::ValueMissing => "value-missing",
        }
    }
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of reading one workbook
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
    Found(FoundScore),
    /// No sheet matched the requested name
    SheetNotFound { requested_sheet: String },
    /// The sheet exists but holds no recognizable score
    ValueNotFound { requested_sheet: String },
}

impl ExtractionResult {
    pub fn is_found(&self) -> bool {
        matches!(self, ExtractionResult::Found(_))
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            ExtractionResult::Found(found) => Some(found.score),
            _ => None,
        }
    }

    pub fn found(&self) -> Option<&FoundScore> {
        match self {
            ExtractionResult::Found(found) => Some(found),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<NotFoundReason> {
        match self {
            ExtractionResult::Found(_) => None,
            ExtractionResult::SheetNotFound { .. } => Some(NotFoundReason::SheetMissing),
            ExtractionResult::ValueNotFound { .. } => Some(NotFoundReason::ValueMissing),
        }
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionResult::Found(found) => write!(
                f,
                "{} in '{}'!{} ({})",
                found.score, found.sheet, found.address, found.strategy
            ),
            ExtractionResult::SheetNotFound { requested_sheet } => {
                write!(f, "sheet '{}' not found", requested_sheet)
            }
            ExtractionResult::ValueNotFound { requested_sheet } => write!(
                f,
                "no total score in sheet '{}'; check that the report follows the template",
                requested_sheet
            ),
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Wire<'a> {
    Found {
        found: bool,
        score: f64,
        sheet: &'a str,
        cell: String,
        strategy: &'a str,
    },
    NotFound {
        found: bool,
        reason: &'static str,
        #[serde(rename = "requestedSheet")]
        requested_sheet: &'a str,
    },
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            ExtractionResult::Found(found) => Wire::Found {
                found: true,
                score: found.score,
                sheet: &found.sheet,
                cell: found.address.to_string(),
                strategy: found.strategy,
            },
            ExtractionResult::SheetNotFound { requested_sheet }
            | ExtractionResult::ValueNotFound { requested_sheet } => Wire::NotFound {
                found: false,
                reason: self.reason().map_or("", |r| r.as_str()),
                requested_sheet,
            },
        };
        wire.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_found_json() {
        let result = ExtractionResult::Found(FoundScore {
            score: 87.5,
            sheet: "UPT Bandung".into(),
            address: CellAddress::new(12, 3),
            strategy: "fixed-cell",
        });

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "found": true,
                "score": 87.5,
                "sheet": "UPT Bandung",
                "cell": "D13",
                "strategy": "fixed-cell",
            })
        );
    }

    #[test]
    fn test_not_found_json() {
        let missing = ExtractionResult::SheetNotFound {
            requested_sheet: "upt medan".into(),
        };
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            json!({ "found": false, "reason": "sheet-missing", "requestedSheet": "upt medan" })
        );

        let empty = ExtractionResult::ValueNotFound {
            requested_sheet: "UPT Medan".into(),
        };
        assert_eq!(
            serde_json::to_value(&empty).unwrap(),
            json!({ "found": false, "reason": "value-missing", "requestedSheet": "UPT Medan" })
        );
    }

    #[test]
    fn test_display() {
        let missing = ExtractionResult::SheetNotFound {
            requested_sheet: "X".into(),
        };
        assert_eq!(missing.to_string(), "sheet 'X' not found");
        assert_eq!(missing.score(), None);
        assert!(!missing.is_found());
    }
}
