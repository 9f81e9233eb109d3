//! Varsheet CLI - convert a variant spreadsheet to gene-grouped JSON
//!
//! ```bash
//! varsheet variants.xlsx data.json
//! varsheet variants.xlsx data.json --gene-column Symbol --sheet Curated
//! varsheet variants.csv data.json --indent 2
//! ```

use clap::Parser;
use std::path::PathBuf;
use varsheet::config::{ConvertOptions, DEFAULT_GENE_COLUMN, DEFAULT_INDENT, GENE_COLUMN_ENV, SHEET_ENV};
use varsheet::convert_and_report;

#[derive(Parser)]
#[command(name = "varsheet")]
#[command(about = "Convert variant data from a spreadsheet to a gene-grouped JSON document", long_about = None)]
struct Cli {
    /// Input spreadsheet (.xlsx, .xls, .ods, .csv, .tsv)
    input_file: PathBuf,

    /// Output JSON file (e.g. data.json)
    output_file: PathBuf,

    /// Name of the column containing the gene symbol
    #[arg(long, env = GENE_COLUMN_ENV, default_value = DEFAULT_GENE_COLUMN)]
    gene_column: String,

    /// Worksheet to read (default: first sheet)
    #[arg(long, env = SHEET_ENV)]
    sheet: Option<String>,

    /// Spaces per indentation level in the output
    #[arg(long, default_value_t = DEFAULT_INDENT)]
    indent: usize,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            gene_column: self.gene_column.clone(),
            sheet: self.sheet.clone(),
            indent: self.indent,
        }
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if !convert_and_report(&cli.input_file, &cli.output_file, &cli.options()) {
        std::process::exit(1);
    }
}
