//! Group spreadsheet rows by gene symbol.
//!
//! ```text
//! Input rows                           →  Grouped output
//! ┌─────────────────────────────┐        ┌──────────────────────────┐
//! │ Gene: LDLR, c.: c.1A>G      │        │ LDLR                     │
//! │ Gene: LDLR, c.: c.2T>C      │   →    │   variants: [1A>G, 2T>C] │
//! │ Gene: APOB, c.: c.9C>T      │        ├──────────────────────────┤
//! └─────────────────────────────┘        │ APOB                     │
//!                                        │   variants: [9C>T]       │
//!                                        └──────────────────────────┘
//! ```
//!
//! Genes keep the order in which they first appear, variants keep source
//! row order, and the gene column is dropped from every variant.

use crate::models::{CellValue, Dataset, GeneDocument, GeneRecord, VariantDetail};

/// A row left out of the output.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based row number in the source sheet.
    pub row: usize,
    pub reason: String,
}

/// Output of [`group_by_gene`].
#[derive(Debug, Clone, Default)]
pub struct GroupingResult {
    pub genes: GeneDocument,
    pub skipped: Vec<SkippedRow>,
}

impl GroupingResult {
    pub fn variant_count(&self) -> usize {
        self.genes.values().map(|g| g.variants.len()).sum()
    }
}

/// True when a gene cell counts as missing: null, `false`, zero, or blank text.
pub fn is_missing_key(value: &CellValue) -> bool {
    match value {
        CellValue::Null => true,
        CellValue::Bool(b) => !b,
        CellValue::Int(i) => *i == 0,
        CellValue::Float(x) => *x == 0.0,
        CellValue::String(s) => s.trim().is_empty(),
        CellValue::DateTime(_) | CellValue::Time(_) => false,
    }
}

/// Output key for a present gene cell.
fn key_text(value: &CellValue) -> String {
    match value {
        CellValue::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Group every row of `dataset` under its value in column `gene_index`.
///
/// Rows with a missing gene are reported in [`GroupingResult::skipped`].
///
/// # Panics
///
/// If `gene_index` is not a column of `dataset`.
pub fn group_by_gene(dataset: &Dataset, gene_index: usize) -> GroupingResult {
    let columns = dataset.columns();
    let gene_column = &columns[gene_index];
    let mut result = GroupingResult::default();

    for (i, row) in dataset.rows().iter().enumerate() {
        let gene = &row[gene_index];

        if is_missing_key(gene) {
            result.skipped.push(SkippedRow {
                row: dataset.sheet_row(i),
                reason: format!("missing gene name in column '{}'", gene_column),
            });
            continue;
        }

        let variant: VariantDetail = columns
            .iter()
            .zip(row.iter())
            .enumerate()
            .filter(|(j, _)| *j != gene_index)
            .map(|(_, (name, value))| (name.clone(), value.clone()))
            .collect();

        result
            .genes
            .entry(key_text(gene))
            .or_insert_with(GeneRecord::new)
            .variants
            .push(variant);
    }

    result
}
