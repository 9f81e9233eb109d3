//! Workbook reader built on calamine.
//!
//! The first used row of the selected sheet is the header. Cell errors and empty
//! cells become `Null`; date cells become [`CellValue::DateTime`], time-only
//! cells [`CellValue::Time`] and duration cells ISO-8601 duration text.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime};

use super::{text_cell, unique_headers};
use crate::error::{LoadError, LoadResult};
use crate::models::{CellValue, Dataset};

/// Convert one workbook cell.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(x) => CellValue::from_f64(*x),
        Data::String(s) => text_cell(s),
        Data::DateTime(dt) if dt.is_duration() => dt
            .as_duration()
            .map(|d| CellValue::String(d.to_string()))
            .unwrap_or(CellValue::Null),
        // Serials below one day carry no date, only a time of day.
        Data::DateTime(dt) if (0.0..1.0).contains(&dt.as_f64()) => dt
            .as_datetime()
            .map(|d| CellValue::Time(d.time()))
            .unwrap_or(CellValue::Null),
        Data::DateTime(dt) => dt.as_datetime().map(CellValue::DateTime).unwrap_or(CellValue::Null),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| text_cell(s)),
        Data::DurationIso(s) => text_cell(s),
    }
}

/// Parse the ISO date or date-time text OpenDocument stores.
fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Read one sheet of a workbook. `None` selects the first sheet.
///
/// calamine ranges begin at the first used cell, so blank leading rows
/// and columns are restored: row numbers stay sheet-relative and each
/// blank leading column becomes an `Unnamed: <index>` column of nulls.
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> LoadResult<Dataset> {
    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::unreadable(path, e))?;

    let range = match sheet {
        Some(name) => {
            let available = workbook.sheet_names();
            if !available.iter().any(|s| s == name) {
                return Err(LoadError::UnknownSheet {
                    sheet: name.to_string(),
                    available,
                });
            }
            workbook
                .worksheet_range(name)
                .map_err(|e| LoadError::unreadable(path, e))?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoadError::Empty {
                path: path.to_path_buf(),
            })?
            .map_err(|e| LoadError::unreadable(path, e))?,
    };

    let empty = || LoadError::Empty {
        path: path.to_path_buf(),
    };
    let (start_row, start_col) = range.start().ok_or_else(empty)?;
    let leading = start_col as usize;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(empty)?;

    let raw_headers = std::iter::repeat(String::new())
        .take(leading)
        .chain(header.iter().map(|c| cell_value(c).to_string()))
        .collect();
    let columns = unique_headers(raw_headers);

    let body = rows
        .map(|row| {
            std::iter::repeat(CellValue::Null)
                .take(leading)
                .chain(row.iter().map(cell_value))
                .collect()
        })
        .collect();

    Ok(Dataset::new(columns, body).with_header_row(start_row as usize + 1))
}
