//! # Varsheet - variant spreadsheets to gene-grouped JSON
//!
//! Varsheet reads a curation spreadsheet with one variant per row and
//! writes a JSON document keyed by gene symbol, ready for the variant
//! browser.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ XLSX / CSV  │────▶│   Parser    │────▶│   Grouper   │────▶│  Gene JSON  │
//! │             │     │ (typed, NA) │     │  (by gene)  │     │  (atomic)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use varsheet::{convert, ConvertOptions};
//! use std::path::Path;
//!
//! let options = ConvertOptions::default().with_gene_column("Gene");
//! let summary = convert(Path::new("variants.xlsx"), Path::new("data.json"), &options)?;
//! println!("Grouped {} variants into {} genes", summary.variant_count, summary.gene_count);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Cell values, datasets, gene records
//! - [`parser`] - Workbook and delimited-text loading
//! - [`transform`] - Grouping and the conversion pipeline
//! - [`config`] - Conversion options
//! - [`logs`] - Operator log lines

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Options and reporting
pub mod config;
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConvertError, ConvertResult, LoadError, LoadResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CellValue, Dataset, GeneDocument, GeneRecord, VariantDetail};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{load_dataset, InputFormat};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    convert,
    convert_and_report,
    group_by_gene,
    is_missing_key,
    render_json,
    ConversionSummary,
    GroupingResult,
    SkippedRow,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{ConvertOptions, DEFAULT_GENE_COLUMN};
