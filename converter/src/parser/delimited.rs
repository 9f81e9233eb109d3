//! Delimited text reader with encoding and delimiter auto-detection.
//!
//! Cells are typed by content: missing-value markers become `Null`, then
//! integers, floats and booleans are recognized, ignoring surrounding
//! whitespace. Everything else is kept as the exact source text. Dates are
//! not inferred from text files.

use std::path::Path;

use super::{is_na_marker, unique_headers};
use crate::error::{LoadError, LoadResult};
use crate::models::{CellValue, Dataset};

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Unknown encodings fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Type one text cell.
pub fn infer_cell(raw: &str) -> CellValue {
    if is_na_marker(raw) {
        return CellValue::Null;
    }

    let text = raw.trim();
    if let Ok(i) = text.parse::<i64>() {
        return CellValue::Int(i);
    }
    // "inf" and "infinity" parse as floats; only digits count as numbers here.
    if text.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(x) = text.parse::<f64>() {
            return CellValue::from_f64(x);
        }
    }
    if text.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    CellValue::String(raw.to_string())
}

/// Parse decoded text with an explicit delimiter.
pub fn parse_delimited(content: &str, delimiter: char) -> Result<Dataset, String> {
    let delimiter = u8::try_from(delimiter).map_err(|_| format!("non-ASCII delimiter '{}'", delimiter))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(|e| e.to_string())?,
        None => return Err("no header row".to_string()),
    };
    let header_row = header.position().map_or(1, |p| p.line() as usize);
    let columns = unique_headers(header.iter().map(str::to_string).collect());

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| e.to_string())?;
        rows.push(record.iter().map(infer_cell).collect());
    }

    Ok(Dataset::new(columns, rows).with_header_row(header_row))
}

/// Read a delimited file. `delimiter` overrides detection.
pub fn read_delimited(path: &Path, delimiter: Option<char>) -> LoadResult<Dataset> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::unreadable(path, e))?;

    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding);
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    parse_delimited(&content, delimiter).map_err(|message| LoadError::unreadable(path, message))
}
