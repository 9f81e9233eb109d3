//! Load a spreadsheet into a [`Dataset`].
//!
//! Workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) go through
//! [`workbook`], delimited text (`.csv`, `.tsv`, `.txt`) through
//! [`delimited`]. Both normalize missing-value markers to
//! [`CellValue::Null`] and name columns with [`unique_headers`].

pub mod delimited;
pub mod workbook;

use std::collections::HashSet;
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::models::{CellValue, Dataset};

pub use delimited::{decode_content, detect_delimiter, detect_encoding, read_delimited};
pub use workbook::read_workbook;

/// Text cells treated as "not available".
pub const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Input file family, chosen from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Workbook,
    /// Delimited text; `Some` forces the delimiter instead of detecting it.
    Delimited(Option<char>),
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "ods" => Some(Self::Workbook),
            "tsv" | "tab" => Some(Self::Delimited(Some('\t'))),
            "csv" | "txt" => Some(Self::Delimited(None)),
            _ => None,
        }
    }
}

/// Load the whole input file.
///
/// `sheet` selects a worksheet by name; `None` means the first sheet.
/// It is ignored for delimited files.
pub fn load_dataset(path: &Path, sheet: Option<&str>) -> LoadResult<Dataset> {
    match std::fs::metadata(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(LoadError::unreadable(path, e)),
        Ok(meta) if meta.is_dir() => return Err(LoadError::unreadable(path, "is a directory")),
        Ok(_) => {}
    }

    match InputFormat::from_path(path) {
        Some(InputFormat::Workbook) => read_workbook(path, sheet),
        Some(InputFormat::Delimited(delimiter)) => read_delimited(path, delimiter),
        None => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// True for the text forms of a missing value.
pub fn is_na_marker(text: &str) -> bool {
    NA_MARKERS.contains(&text)
}

/// Text cell, or `Null` when it is a missing-value marker.
pub fn text_cell(text: &str) -> CellValue {
    if is_na_marker(text) {
        CellValue::Null
    } else {
        CellValue::String(text.to_string())
    }
}

/// Make header names addressable: blank names become `Unnamed: <index>`,
/// repeated names get `.1`, `.2`, ... suffixes.
pub fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());

    for (i, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", i)
        } else {
            name
        };

        let mut candidate = base.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, n);
            n += 1;
        }

        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}
