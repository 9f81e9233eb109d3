//! High-level conversion API: spreadsheet in, gene-grouped JSON out.
//!
//! # Example
//!
//! ```rust,ignore
//! use varsheet::{convert, ConvertOptions};
//! use std::path::Path;
//!
//! let summary = convert(
//!     Path::new("variants.xlsx"),
//!     Path::new("data.json"),
//!     &ConvertOptions::default(),
//! )?;
//! println!("{} genes", summary.gene_count);
//! ```

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::grouper::{group_by_gene, SkippedRow};
use crate::config::ConvertOptions;
use crate::error::{ConvertError, ConvertResult};
use crate::logs::{log_error, log_info, log_info_indent, log_success, log_warning};
use crate::parser::load_dataset;

/// What a successful conversion produced.
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub row_count: usize,
    pub gene_count: usize,
    pub variant_count: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Convert `input` into a gene-grouped JSON document at `output`.
///
/// 1. Loads the whole sheet, normalizing missing values to null
/// 2. Checks the gene column exists
/// 3. Groups rows by gene, skipping rows without one
/// 4. Writes pretty JSON atomically
///
/// Nothing is written unless every step succeeds.
pub fn convert(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> ConvertResult<ConversionSummary> {
    log_info(format!("📖 Reading {}", input.display()));
    let dataset = load_dataset(input, options.sheet.as_deref())?;
    log_success(format!(
        "Read {} rows, {} columns",
        dataset.len(),
        dataset.columns().len()
    ));
    for (i, column) in dataset.columns().iter().enumerate() {
        log_info_indent(format!("[{:2}] {}", i + 1, column), 1);
    }

    let gene_index = dataset
        .column_index(&options.gene_column)
        .ok_or_else(|| ConvertError::MissingGroupColumn {
            column: options.gene_column.clone(),
            available: dataset.columns().to_vec(),
        })?;

    log_info(format!("📦 Grouping by '{}'...", options.gene_column));
    let grouping = group_by_gene(&dataset, gene_index);
    for skipped in &grouping.skipped {
        log_warning(format!("Skipping row {} with {}", skipped.row, skipped.reason));
    }
    log_success(format!(
        "{} genes, {} variants",
        grouping.genes.len(),
        grouping.variant_count()
    ));

    let json = render_json(&grouping.genes, options.indent)?;
    write_atomic(output, json.as_bytes())?;

    Ok(ConversionSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        row_count: dataset.len(),
        gene_count: grouping.genes.len(),
        variant_count: grouping.variant_count(),
        skipped: grouping.skipped,
    })
}

/// Run [`convert`] and report the outcome instead of returning an error.
///
/// Returns `true` when the output file was written.
pub fn convert_and_report(input: &Path, output: &Path, options: &ConvertOptions) -> bool {
    match convert(input, output, options) {
        Ok(summary) => {
            log_success(format!(
                "Successfully converted '{}' to '{}'",
                summary.input.display(),
                summary.output.display()
            ));
            true
        }
        Err(e) => {
            log_error(format!("Error: {}", e));
            false
        }
    }
}

/// Pretty-print `value` with `indent` spaces per level.
///
/// Non-ASCII text is written as-is. No trailing newline.
pub fn render_json<T: Serialize + ?Sized>(value: &T, indent: usize) -> ConvertResult<String> {
    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());

    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(|e| ConvertError::Serialize(serde::ser::Error::custom(e)))
}

/// Write through a temporary file in the same directory, then rename.
///
/// On failure the temporary file is removed and `path` is untouched.
fn write_atomic(path: &Path, contents: &[u8]) -> ConvertResult<()> {
    let write_err = |source: std::io::Error| ConvertError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // Temporary files are created owner-only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
