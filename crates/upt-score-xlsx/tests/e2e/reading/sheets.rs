//! Sheet discovery and cell placement

use crate::common::{build_xlsx, SheetFixture};
use pretty_assertions::assert_eq;
use std::io::Write;
use upt_score_core::CellValue;
use upt_score_xlsx::XlsxReader;

#[test]
fn test_sheets_in_workbook_order() {
    let bytes = build_xlsx(
        &[
            SheetFixture::new("Ringkasan", ""),
            SheetFixture::new("UPT Bandung", r#"<row r="13"><c r="D13"><v>91</v></c></row>"#),
            SheetFixture {
                hidden: true,
                ..SheetFixture::new("Lookup", "")
            },
        ],
        &[],
    );

    let workbook = XlsxReader::read_bytes(&bytes).unwrap();
    assert_eq!(
        workbook.sheet_names().collect::<Vec<_>>(),
        vec!["Ringkasan", "UPT Bandung", "Lookup"]
    );
    assert!(workbook.worksheet(1).unwrap().is_visible());
    assert!(!workbook.worksheet(2).unwrap().is_visible());

    let sheet = workbook.worksheet_by_name("UPT Bandung").unwrap();
    assert_eq!(sheet.get_value("D13").unwrap(), CellValue::Number(91.0));
    assert_eq!(sheet.cell_count(), 1);
}

#[test]
fn test_read_from_file() {
    let bytes = build_xlsx(
        &[SheetFixture::new(
            "Sheet1",
            r#"<row r="5"><c r="A5" t="inlineStr"><is><t>Total Score</t></is></c><c r="B5"><v>77</v></c></row>"#,
        )],
        &[],
    );

    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();

    let workbook = XlsxReader::read_file(file.path()).unwrap();
    let sheet = workbook.worksheet(0).unwrap();

    let row = sheet.row(4);
    assert_eq!(row.cell_count(), 2);
    assert_eq!(row.cell(0).and_then(|v| v.as_string()), Some("Total Score"));
    assert_eq!(row.cell(1).and_then(|v| v.as_number()), Some(77.0));
}

#[test]
fn test_negative_and_fractional_numbers() {
    let bytes = build_xlsx(
        &[SheetFixture::new(
            "Sheet1",
            r#"<row r="1"><c r="A1"><v>-12.25</v></c><c r="B1"><v>1E3</v></c><c r="C1" t="n"><v>0</v></c></row>"#,
        )],
        &[],
    );

    let workbook = XlsxReader::read_bytes(&bytes).unwrap();
    let sheet = workbook.worksheet(0).unwrap();
    assert_eq!(sheet.get_value("A1").unwrap().as_number(), Some(-12.25));
    assert_eq!(sheet.get_value("B1").unwrap().as_number(), Some(1000.0));
    assert_eq!(sheet.get_value("C1").unwrap().as_number(), Some(0.0));
}

#[test]
fn test_names_excel_would_not_author_are_kept() {
    let bytes = build_xlsx(
        &[
            SheetFixture::new(
                "UPT Bandung Laporan Kinerja Triwulan",
                r#"<row r="13"><c r="D13"><v>88</v></c></row>"#,
            ),
            SheetFixture::new("Skor: [Final]", ""),
            SheetFixture::new("skor: [final]", ""),
        ],
        &[],
    );

    let workbook = XlsxReader::read_bytes(&bytes).unwrap();
    assert_eq!(
        workbook.sheet_names().collect::<Vec<_>>(),
        vec!["UPT Bandung Laporan Kinerja Triwulan", "Skor: [Final]", "skor: [final]"]
    );

    let sheet = workbook
        .worksheet_by_name_ignore_case("upt bandung laporan kinerja triwulan")
        .unwrap();
    assert_eq!(sheet.get_value("D13").unwrap(), CellValue::Number(88.0));
}
