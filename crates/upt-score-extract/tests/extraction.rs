//! Behaviour of `extract_score` on report-shaped workbooks

use pretty_assertions::assert_eq;
use upt_score_core::{CellValue, Workbook, Worksheet};
use upt_score_extract::{extract_score, ExtractionResult, NotFoundReason};

fn workbook(sheets: Vec<Worksheet>) -> Workbook {
    let mut wb = Workbook::empty();
    for sheet in sheets {
        wb.add_existing_worksheet(sheet).unwrap();
    }
    wb
}

fn sheet(name: &str, cells: &[(&str, CellValue)]) -> Worksheet {
    let mut ws = Worksheet::new(name);
    for (addr, value) in cells {
        ws.set_cell_value(addr, value.clone()).unwrap();
    }
    ws
}

#[test]
fn fixed_cell_takes_priority() {
    let wb = workbook(vec![sheet(
        "UPT Bandung",
        &[
            ("A5", CellValue::string("Total Score")),
            ("B5", CellValue::Number(10.0)),
            ("D13", CellValue::Number(87.5)),
        ],
    )]);

    let result = extract_score(&wb, "UPT Bandung");
    let found = result.found().unwrap();
    assert_eq!(found.score, 87.5);
    assert_eq!(found.address.to_string(), "D13");
    assert_eq!(found.strategy, "fixed-cell");
}

#[test]
fn label_fallback_when_fixed_cell_empty() {
    let wb = workbook(vec![sheet(
        "UPT Bandung",
        &[
            ("A5", CellValue::string("Total Score")),
            ("B5", CellValue::Number(77.0)),
        ],
    )]);

    let result = extract_score(&wb, "upt bandung");
    assert_eq!(result.score(), Some(77.0));
    assert_eq!(result.found().unwrap().strategy, "label-scan");
    assert_eq!(result.found().unwrap().sheet, "UPT Bandung");
}

#[test]
fn label_fallback_when_fixed_cell_is_text() {
    let wb = workbook(vec![sheet(
        "UPT Medan",
        &[
            ("D13", CellValue::string("n/a")),
            ("C20", CellValue::string("  total SCORE ")),
            ("F20", CellValue::Number(66.0)),
        ],
    )]);

    assert_eq!(extract_score(&wb, "UPT Medan").score(), Some(66.0));
}

#[test]
fn zero_is_a_score() {
    let wb = workbook(vec![sheet("Sheet1", &[("D13", CellValue::Number(0.0))])]);

    let result = extract_score(&wb, "Sheet1");
    assert_eq!(result.score(), Some(0.0));
    assert!(result.is_found());
}

#[test]
fn sheet_missing() {
    let wb = workbook(vec![sheet("UPT Bandung", &[("D13", CellValue::Number(1.0))])]);

    let result = extract_score(&wb, "UPT Medan");
    assert_eq!(
        result,
        ExtractionResult::SheetNotFound {
            requested_sheet: "UPT Medan".into()
        }
    );
    assert_eq!(result.reason(), Some(NotFoundReason::SheetMissing));
}

#[test]
fn sheet_name_must_match_whole() {
    let wb = workbook(vec![sheet("UPT Bandung Barat", &[("D13", CellValue::Number(1.0))])]);

    assert_eq!(
        extract_score(&wb, "UPT Bandung").reason(),
        Some(NotFoundReason::SheetMissing)
    );
}

#[test]
fn value_missing_on_empty_sheet() {
    let wb = workbook(vec![sheet("Sheet1", &[])]);

    assert_eq!(
        extract_score(&wb, "sheet1"),
        ExtractionResult::ValueNotFound {
            requested_sheet: "sheet1".into()
        }
    );
}

#[test]
fn label_row_without_number_stops_the_scan() {
    // A later labelled row with a number is not consulted.
    let wb = workbook(vec![sheet(
        "Sheet1",
        &[
            ("A5", CellValue::string("Total Score")),
            ("B5", CellValue::string("pending")),
            ("A9", CellValue::string("Total Score")),
            ("B9", CellValue::Number(50.0)),
        ],
    )]);

    assert_eq!(
        extract_score(&wb, "Sheet1").reason(),
        Some(NotFoundReason::ValueMissing)
    );
}

#[test]
fn first_label_in_row_is_used() {
    let wb = workbook(vec![sheet(
        "Sheet1",
        &[
            ("A5", CellValue::string("Total Score")),
            ("B5", CellValue::string("Total Score")),
            ("C5", CellValue::Number(12.0)),
        ],
    )]);

    let result = extract_score(&wb, "Sheet1");
    assert_eq!(result.found().unwrap().address.to_string(), "C5");
}

#[test]
fn numeric_text_and_booleans_are_not_scores() {
    let wb = workbook(vec![sheet(
        "Sheet1",
        &[
            ("D13", CellValue::Boolean(true)),
            ("A2", CellValue::string("Total Score")),
            ("B2", CellValue::string("90")),
            ("C2", CellValue::Boolean(false)),
        ],
    )]);

    assert_eq!(
        extract_score(&wb, "Sheet1").reason(),
        Some(NotFoundReason::ValueMissing)
    );
}

#[test]
fn formula_cached_value_counts() {
    let wb = workbook(vec![sheet(
        "Sheet1",
        &[(
            "D13",
            CellValue::formula_with_result("=SUM(D2:D12)", CellValue::Number(91.25)),
        )],
    )]);

    assert_eq!(extract_score(&wb, "Sheet1").score(), Some(91.25));
}

#[test]
fn formula_without_cached_value_is_skipped() {
    let wb = workbook(vec![sheet(
        "Sheet1",
        &[
            ("D13", CellValue::formula("=SUM(D2:D12)")),
            ("A1", CellValue::string("Total Score")),
            ("B1", CellValue::Number(3.0)),
        ],
    )]);

    let result = extract_score(&wb, "Sheet1");
    assert_eq!(result.found().unwrap().strategy, "label-scan");
}

#[test]
fn first_case_insensitive_match_wins() {
    let mut first = Worksheet::new("Sheet1");
    first.set_cell_value("D13", 1.0).unwrap();
    let mut second = Worksheet::new("SHEET1");
    second.set_cell_value("D13", 2.0).unwrap();

    let mut wb = Workbook::empty();
    wb.push_decoded_worksheet(first);
    wb.push_decoded_worksheet(second);

    assert_eq!(extract_score(&wb, "sheet1").score(), Some(1.0));
}

#[test]
fn hidden_sheets_are_eligible() {
    let mut hidden = sheet("UPT Bandung", &[("D13", CellValue::Number(70.0))]);
    hidden.set_visible(false);
    let wb = workbook(vec![hidden]);

    assert_eq!(extract_score(&wb, "UPT Bandung").score(), Some(70.0));
}
