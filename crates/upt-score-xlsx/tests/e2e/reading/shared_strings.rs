//! Shared string table decoding

use crate::common::{build_xlsx, SheetFixture};
use pretty_assertions::assert_eq;
use upt_score_xlsx::XlsxReader;

#[test]
fn test_shared_string_cells() {
    let bytes = build_xlsx(
        &[SheetFixture::new(
            "Sheet1",
            r#"<row r="5"><c r="A5" t="s"><v>0</v></c><c r="B5" t="s"><v>1</v></c></row>"#,
        )],
        &["Total Score", "77"],
    );

    let workbook = XlsxReader::read_bytes(&bytes).unwrap();
    let sheet = workbook.worksheet(0).unwrap();

    assert_eq!(sheet.get_value("A5").unwrap().as_string(), Some("Total Score"));
    // A shared string holding digits is still a string
    assert_eq!(sheet.get_value("B5").unwrap().as_number(), None);
    assert_eq!(sheet.get_value("B5").unwrap().as_string(), Some("77"));
}

#[test]
fn test_rich_text_runs_are_concatenated() {
    let bytes = build_xlsx(
        &[SheetFixture::new(
            "Sheet1",
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>"#,
        )],
        &[
            r#"<r><t>Total</t></r><r><t xml:space="preserve"> Score</t></r>"#,
            "Line_x000a_Break",
        ],
    );

    let workbook = XlsxReader::read_bytes(&bytes).unwrap();
    let sheet = workbook.worksheet(0).unwrap();

    assert_eq!(sheet.get_value("A1").unwrap().as_string(), Some("Total Score"));
    assert_eq!(sheet.get_value("B1").unwrap().as_string(), Some("Line\nBreak"));
}

#[test]
fn test_empty_strings_are_not_stored() {
    let bytes = build_xlsx(
        &[SheetFixture::new(
            "Sheet1",
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="inlineStr"><is><t></t></is></c></row>"#,
        )],
        &["<t></t>", "Total Score"],
    );

    let workbook = XlsxReader::read_bytes(&bytes).unwrap();
    let sheet = workbook.worksheet(0).unwrap();

    assert!(sheet.get_value("A1").unwrap().is_empty());
    assert!(sheet.get_value("C1").unwrap().is_empty());
    assert_eq!(sheet.cell_count(), 1);
}
