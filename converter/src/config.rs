//! Conversion options.
//!
//! The CLI fills these from flags, falling back to the `VARSHEET_*`
//! environment variables (a `.env` file is honoured) and then to
//! [`ConvertOptions::default`].

/// Column holding the gene symbol when none is given.
pub const DEFAULT_GENE_COLUMN: &str = "Gene";

/// Spaces per JSON indentation level.
pub const DEFAULT_INDENT: usize = 4;

/// Environment variable overriding the gene column.
pub const GENE_COLUMN_ENV: &str = "VARSHEET_GENE_COLUMN";

/// Environment variable selecting the worksheet.
pub const SHEET_ENV: &str = "VARSHEET_SHEET";

/// Options for a single conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Column used to group rows.
    pub gene_column: String,

    /// Worksheet name; the first sheet when `None`.
    pub sheet: Option<String>,

    /// JSON indentation width.
    pub indent: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            gene_column: DEFAULT_GENE_COLUMN.to_string(),
            sheet: None,
            indent: DEFAULT_INDENT,
        }
    }
}

impl ConvertOptions {
    pub fn with_gene_column(mut self, column: impl Into<String>) -> Self {
        self.gene_column = column.into();
        self
    }

    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
