//! Domain models for the varsheet conversion pipeline.
//!
//! - [`CellValue`] - one typed spreadsheet cell, with a single explicit null
//! - [`Dataset`] - header plus rows, as loaded from the input file
//! - [`VariantDetail`] - one row minus the gene column
//! - [`GeneRecord`] - all variants sharing a gene symbol
//! - [`GeneDocument`] - the output mapping, in first-seen order

use chrono::{NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// ISO-8601 layout for date-time cells. `%.f` omits zero fractional seconds.
const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// ISO-8601 layout for time-of-day cells.
const ISO_TIME: &str = "%H:%M:%S%.f";

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

// =============================================================================
// Cell Value
// =============================================================================

/// A single cell, typed at load time.
///
/// Every "not available" form of the source format collapses into
/// [`CellValue::Null`] before grouping sees the data.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(NaiveDateTime),
    /// Time of day with no date part.
    Time(NaiveTime),
}

impl CellValue {
    /// Build a numeric cell. Whole numbers become `Int`, NaN and infinities become `Null`.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            CellValue::Null
        } else if value.fract() == 0.0 && value.abs() < MAX_EXACT_FLOAT_INT {
            CellValue::Int(value as i64)
        } else {
            CellValue::Float(value)
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// ISO-8601 text for date-time cells.
    pub fn iso_datetime(dt: &NaiveDateTime) -> String {
        dt.format(ISO_DATETIME).to_string()
    }

    /// ISO-8601 text for time-of-day cells.
    pub fn iso_time(t: &NaiveTime) -> String {
        t.format(ISO_TIME).to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::String(s) => f.write_str(s),
            CellValue::DateTime(dt) => f.write_str(&Self::iso_datetime(dt)),
            CellValue::Time(t) => f.write_str(&Self::iso_time(t)),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Int(i) => serializer.serialize_i64(*i),
            CellValue::Float(x) => serializer.serialize_f64(*x),
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::DateTime(dt) => serializer.serialize_str(&Self::iso_datetime(dt)),
            CellValue::Time(t) => serializer.serialize_str(&Self::iso_time(t)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The whole input table: ordered column names and rows aligned to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    /// 1-based sheet row holding the header.
    header_row: usize,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Dataset {
    /// Build a dataset, padding short rows with `Null` and truncating long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Self {
            columns,
            rows,
            header_row: 1,
        }
    }

    /// Record where the header sits in the source sheet.
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }

    pub fn header_row(&self) -> usize {
        self.header_row
    }

    /// 1-based sheet row of the data row at `index`.
    pub fn sheet_row(&self, index: usize) -> usize {
        self.header_row + index + 1
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

// =============================================================================
// Output Records
// =============================================================================

/// One source row with the gene column removed, in source column order.
pub type VariantDetail = IndexMap<String, CellValue>;

/// Aggregate of every variant sharing a gene symbol.
///
/// `full_name`, `chromosome` and `summary` stay empty; they are filled by
/// later enrichment, not by the converter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneRecord {
    pub full_name: String,
    pub chromosome: String,
    pub summary: String,
    pub variants: Vec<VariantDetail>,
}

impl GeneRecord {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Gene symbol to record, in order of first appearance.
pub type GeneDocument = IndexMap<String, GeneRecord>;
