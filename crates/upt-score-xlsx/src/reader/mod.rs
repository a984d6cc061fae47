//! XLSX reader
//!
//! Decodes the cell values of every worksheet in an `.xlsx`/`.xlsm` package.
//! Styles, comments, validations and drawing parts are skipped: report
//! uploads only need their values.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use upt_score_core::{
    CellAddress, CellError, CellValue, SharedString, StringPool, Workbook, Worksheet,
};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Read the first attribute named `key` as an owned string
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()))
}

/// A sheet entry from `xl/workbook.xml`
#[derive(Debug, Clone, PartialEq)]
struct SheetEntry {
    name: String,
    r_id: String,
    hidden: bool,
}

/// Cell being accumulated between `<c>` and `</c>`
#[derive(Debug, Default)]
struct PendingCell {
    address: Option<CellAddress>,
    cell_type: Option<String>,
    value: Option<String>,
    formula: Option<String>,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from an in-memory upload
    pub fn read_bytes(bytes: &[u8]) -> XlsxResult<Workbook> {
        Self::read(std::io::Cursor::new(bytes))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let mut pool = StringPool::new();
        let shared_strings = Self::read_shared_strings(&mut archive, &mut pool)?;
        let sheets = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::empty();

        for entry in &sheets {
            let Some(path) = sheet_paths.get(&entry.r_id) else {
                // chartsheets and dialog sheets have no worksheet relationship
                log::debug!(
                    "Skipping sheet '{}': no worksheet part for {}",
                    entry.name,
                    entry.r_id
                );
                continue;
            };

            let mut worksheet = Worksheet::new(entry.name.as_str());
            worksheet.set_visible(!entry.hidden);
            Self::read_worksheet(&mut archive, path, &mut worksheet, &shared_strings, &mut pool)?;
            workbook.push_decoded_worksheet(worksheet);
        }

        log::debug!(
            "Read {} worksheet(s), {} shared string(s)",
            workbook.sheet_count(),
            shared_strings.len()
        );

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        pool: &mut StringPool,
    ) -> XlsxResult<Vec<SharedString>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        // Whitespace is significant inside rich-text runs ("Total" + " Score"),
        // so text is not trimmed here.
        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => {
                    strings.push(pool.intern(""));
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(pool.intern(decode_excel_escapes(&current_string)));
                        current_string.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    current_string.push_str(&e.unescape()?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names, rIds and visibility
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<SheetEntry>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let name = attr_value(&e, b"name");
                    let r_id = attr_value(&e, b"r:id");
                    let hidden = attr_value(&e, b"state")
                        .map_or(false, |s| s == "hidden" || s == "veryHidden");

                    match (name, r_id) {
                        (Some(name), Some(r_id)) => sheets.push(SheetEntry { name, r_id, hidden }),
                        _ => {
                            return Err(XlsxError::InvalidFormat(
                                "<sheet> without name or r:id in xl/workbook.xml".into(),
                            ))
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get worksheet part paths keyed by rId
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(&e, b"Id");
                    let target = attr_value(&e, b"Target");
                    let rel_type = attr_value(&e, b"Type");

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            rels.insert(id, Self::resolve_part_path(&target));
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Targets are relative to `xl/` unless absolute within the package
    fn resolve_part_path(target: &str) -> String {
        match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("xl/{}", target.trim_start_matches("./")),
        }
    }

    /// Read a worksheet's `<sheetData>` into `worksheet`
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[SharedString],
        pool: &mut StringPool,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        // Untrimmed: inline rich-text runs keep their edge whitespace
        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();

        // Position of the next cell when `r` attributes are omitted
        let mut next_row: u32 = 0;
        let mut current_row: u32 = 0;
        let mut next_col: u16 = 0;

        let mut cell = PendingCell::default();
        let mut in_cell = false;
        let mut in_value = false;
        let mut in_formula = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = Self::row_index(&e, next_row);
                        next_row = current_row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        in_cell = true;
                        cell = Self::start_cell(&e, current_row, next_col)?;
                    }
                    b"v" if in_cell => in_value = true,
                    b"f" if in_cell => in_formula = true,
                    b"is" if in_cell => in_inline_str = true,
                    b"t" if in_inline_str => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = Self::row_index(&e, next_row);
                        next_row = current_row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        // Self-closing cell: carries no value
                        let empty = Self::start_cell(&e, current_row, next_col)?;
                        if let Some(addr) = empty.address {
                            next_col = addr.col.saturating_add(1);
                        }
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        let pending = std::mem::take(&mut cell);
                        if let Some(addr) = pending.address {
                            next_col = addr.col.saturating_add(1);
                            let value = Self::cell_value(&pending, shared_strings, pool)?;
                            worksheet.set_cell_value_at(addr.row, addr.col, value)?;
                        }
                        in_cell = false;
                    }
                    b"v" => in_value = false,
                    b"f" => in_formula = false,
                    b"is" => in_inline_str = false,
                    b"t" if in_inline_str => in_inline_text = false,
                    b"sheetData" => break,
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if in_value {
                        cell.value = Some(e.unescape()?.to_string());
                    } else if in_formula {
                        cell.formula = Some(e.unescape()?.to_string());
                    } else if in_inline_text {
                        // Inline rich text may be split across runs
                        let text = e.unescape()?;
                        cell.value.get_or_insert_with(String::new).push_str(&text);
                        cell.cell_type = Some("inlineStr".to_string());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// `<row r="13">` is 1-based; rows without `r` follow the previous one
    fn row_index(e: &BytesStart, next_row: u32) -> u32 {
        attr_value(e, b"r")
            .and_then(|s| s.parse::<u32>().ok())
            .map_or(next_row, |r| r.saturating_sub(1))
    }

    fn start_cell(e: &BytesStart, current_row: u32, next_col: u16) -> XlsxResult<PendingCell> {
        let address = match attr_value(e, b"r") {
            Some(cell_ref) => CellAddress::parse(&cell_ref).map_err(|err| {
                XlsxError::Parse(format!("Invalid cell reference '{}': {}", cell_ref, err))
            })?,
            None => CellAddress::new(current_row, next_col),
        };

        Ok(PendingCell {
            address: Some(address),
            cell_type: attr_value(e, b"t"),
            value: None,
            formula: None,
        })
    }

    /// Convert a finished `<c>` element into a cell value
    fn cell_value(
        cell: &PendingCell,
        shared_strings: &[SharedString],
        pool: &mut StringPool,
    ) -> XlsxResult<CellValue> {
        let cell_type = cell.cell_type.as_deref();

        let value = match cell.value.as_deref() {
            Some(raw) => Self::typed_value(raw, cell_type, shared_strings, pool)?,
            None => CellValue::Empty,
        };

        match cell.formula.as_deref() {
            Some(f) if !f.is_empty() => {
                let text = if f.starts_with('=') {
                    f.to_string()
                } else {
                    format!("={}", f)
                };
                Ok(CellValue::Formula {
                    text,
                    cached_value: (!value.is_empty()).then(|| Box::new(value)),
                })
            }
            _ => Ok(value),
        }
    }

    fn typed_value(
        raw: &str,
        cell_type: Option<&str>,
        shared_strings: &[SharedString],
        pool: &mut StringPool,
    ) -> XlsxResult<CellValue> {
        let value = match cell_type {
            // Shared string
            Some("s") => {
                let idx: usize = raw.trim().parse().map_err(|_| {
                    XlsxError::Parse(format!("Invalid shared string index: {}", raw))
                })?;
                let s = shared_strings.get(idx).ok_or_else(|| {
                    XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                })?;
                CellValue::String(s.clone())
            }

            Some("b") => CellValue::Boolean(raw == "1" || raw.eq_ignore_ascii_case("true")),

            Some("e") => CellError::parse(raw)
                .map(CellValue::Error)
                .unwrap_or_else(|| CellValue::String(pool.intern(raw))),

            Some("inlineStr") | Some("str") => {
                CellValue::String(pool.intern(decode_excel_escapes(raw)))
            }

            // Number (default type or explicit "n"); ISO dates ("d") are kept as text
            None | Some("n") => match raw.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::String(pool.intern(raw)),
            },

            Some(other) => {
                log::warn!("Unknown cell type '{}', keeping value as text", other);
                CellValue::String(pool.intern(raw))
            }
        };

        // `<si/>` and `<is><t/></is>` hold nothing a reader can see
        if value.as_string() == Some("") {
            return Ok(CellValue::Empty);
        }

        Ok(value)
    }
}
