//! Error types for the varsheet conversion pipeline.
//!
//! - [`LoadError`] - the input file could not be turned into a dataset
//! - [`ConvertError`] - top-level conversion errors
//!
//! `LoadError` converts into `ConvertError` via `From`, so `?` works across
//! the loading and conversion stages.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Loading Errors
// =============================================================================

/// Errors while reading the input spreadsheet.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input path does not resolve to a file.
    #[error("Input file not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// File exists but could not be parsed as tabular data.
    #[error("Error reading '{}': {message}", path.display())]
    Unreadable { path: PathBuf, message: String },

    /// Requested sheet is not in the workbook.
    #[error("Sheet '{sheet}' not found. Available sheets: {available:?}")]
    UnknownSheet { sheet: String, available: Vec<String> },

    /// No header row.
    #[error("'{}' contains no header row", path.display())]
    Empty { path: PathBuf },

    /// Extension is neither a workbook nor a delimited text format.
    #[error("Unsupported input format: '{}'", path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl LoadError {
    pub fn unreadable(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Unreadable {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

// =============================================================================
// Conversion Errors (top-level)
// =============================================================================

/// Top-level conversion errors.
///
/// This is the error type returned by [`crate::transform::pipeline::convert`].
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Grouping column is absent from the header.
    #[error("Gene column '{column}' not found. Available columns: {available:?}")]
    MissingGroupColumn {
        column: String,
        available: Vec<String>,
    },

    /// JSON rendering failed.
    #[error("Error serializing JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("Error writing JSON file '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
