//! Turning uploaded bytes into a workbook

use std::path::Path;

use thiserror::Error;
use upt_score_core::Workbook;
use upt_score_csv::{CsvError, CsvReadOptions, CsvReader};
use upt_score_xlsx::{XlsxError, XlsxReader};

/// Local file header signature every zip (and so every xlsx) starts with
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Result type for decoding
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Errors from decoding an upload
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Upload formats this crate can decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Xlsx,
    Csv,
}

impl InputFormat {
    /// Format for a file extension (without the dot), ignoring case
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(InputFormat::Xlsx),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }

    /// Format for a path, by extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Sniff the content first, then fall back to the name hint.
    ///
    /// `hint` may be a file name (`report.csv`) or a bare extension (`csv`).
    pub fn detect(bytes: &[u8], hint: Option<&str>) -> Option<Self> {
        if bytes.starts_with(ZIP_MAGIC) {
            return Some(InputFormat::Xlsx);
        }
        let hint = hint?;
        Self::from_path(Path::new(hint)).or_else(|| Self::from_extension(hint))
    }
}

/// CSV uploads carry no header row worth skipping; every cell is typed.
pub fn upload_csv_options() -> CsvReadOptions {
    CsvReadOptions {
        has_header: false,
        ..Default::default()
    }
}

/// Decode an uploaded file into a workbook
pub fn decode_workbook(bytes: &[u8], hint: Option<&str>) -> DecodeResult<Workbook> {
    match InputFormat::detect(bytes, hint) {
        Some(InputFormat::Xlsx) => {
            tracing::debug!("decoding {} bytes as xlsx", bytes.len());
            Ok(XlsxReader::read_bytes(bytes)?)
        }
        Some(InputFormat::Csv) => {
            tracing::debug!("decoding {} bytes as csv", bytes.len());
            Ok(CsvReader::read_workbook(bytes, &upload_csv_options())?)
        }
        None => Err(DecodeError::UnsupportedFormat(
            hint.unwrap_or("<unnamed upload>").to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_magic_beats_hint() {
        assert_eq!(
            InputFormat::detect(b"PK\x03\x04rest", Some("scores.csv")),
            Some(InputFormat::Xlsx)
        );
    }

    #[test]
    fn test_detect_by_hint() {
        assert_eq!(InputFormat::detect(b"a,b", Some("Scores.CSV")), Some(InputFormat::Csv));
        assert_eq!(InputFormat::detect(b"a,b", Some("csv")), Some(InputFormat::Csv));
        assert_eq!(InputFormat::detect(b"a,b", Some("report.xls")), None);
        assert_eq!(InputFormat::detect(b"a,b", None), None);
    }

    #[test]
    fn test_decode_csv_upload_is_typed_from_first_row() {
        let wb = decode_workbook(b"Total Score,77\n", Some("upload.csv")).unwrap();
        let sheet = wb.worksheet(0).unwrap();
        assert_eq!(sheet.get_value("B1").unwrap().as_number(), Some(77.0));
    }

    #[test]
    fn test_unsupported_format() {
        let err = decode_workbook(b"\xd0\xcf\x11\xe0", Some("legacy.xls")).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedFormat(name) if name == "legacy.xls"));
    }

    #[test]
    fn test_bad_zip_is_xlsx_error() {
        let err = decode_workbook(b"PK\x03\x04 truncated", None).unwrap_err();
        assert!(matches!(err, DecodeError::Xlsx(_)));
    }
}
