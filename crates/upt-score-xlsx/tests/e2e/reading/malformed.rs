//! Uploads that cannot be decoded

use crate::common::{build_xlsx, SheetFixture};
use std::io::{Cursor, Write};
use upt_score_xlsx::{XlsxError, XlsxReader};

#[test]
fn test_shared_string_index_out_of_bounds() {
    let bytes = build_xlsx(
        &[SheetFixture::new(
            "Sheet1",
            r#"<row r="1"><c r="A1" t="s"><v>5</v></c></row>"#,
        )],
        &["only one"],
    );

    assert!(matches!(
        XlsxReader::read_bytes(&bytes),
        Err(XlsxError::Parse(_))
    ));
}

#[test]
fn test_missing_content_types() {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        zip.start_file("hello.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"not a workbook").unwrap();
        zip.finish().unwrap();
    }

    assert!(matches!(
        XlsxReader::read_bytes(&buf),
        Err(XlsxError::InvalidFormat(_))
    ));
}

#[test]
fn test_truncated_upload() {
    let bytes = build_xlsx(&[SheetFixture::new("Sheet1", "")], &[]);
    let truncated = &bytes[..bytes.len() / 2];

    assert!(XlsxReader::read_bytes(truncated).is_err());
}
