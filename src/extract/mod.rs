//! Table extraction passes.
//!
//! The listing pass runs the row merge and title resolution passes for every
//! marker-class table; the extraction pass re-resolves one table by index and
//! normalizes it into a grid.
//!
//! # Example
//!
//! ```
//! use unwiki::extract::TableExtractor;
//! use unwiki::parser::HtmlParser;
//!
//! let doc = HtmlParser::from_html(
//!     r#"<h2>Films</h2>
//!        <table class="wikitable"><tr><td rowspan="2">1991</td><td>A</td></tr><tr><td>B</td></tr></table>"#,
//! )
//! .parse();
//!
//! let extractor = TableExtractor::new(&doc);
//! let listing = extractor.list();
//! assert_eq!(listing[0].title, "Films");
//!
//! let grid = extractor.extract(0)?;
//! assert_eq!(grid.rows[1], vec!["1991", "B"]);
//! # Ok::<(), unwiki::Error>(())
//! ```

pub mod grid;
pub mod merge;
pub mod text;
pub mod title;

pub use grid::{normalize_table, normalize_with_merges};
pub use merge::{merge_expansion_rows, RowMerge};
pub use text::{cell_text, flatten_text};
pub use title::{resolve_title, PrecedingElements};

use crate::error::{Error, Result};
use crate::model::{Document, Grid, TableSummary};
use crate::parser::{HtmlTable, ParseOptions};

/// Runs the extraction passes over one document.
pub struct TableExtractor<'d> {
    document: &'d Document,
    options: ParseOptions,
}

impl<'d> TableExtractor<'d> {
    /// Create an extractor with default options.
    pub fn new(document: &'d Document) -> Self {
        Self::with_options(document, ParseOptions::default())
    }

    /// Create an extractor with custom options.
    pub fn with_options(document: &'d Document, options: ParseOptions) -> Self {
        Self { document, options }
    }

    /// Get the extraction options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Get all marker-class tables, in document order.
    pub fn tables(&self) -> Vec<HtmlTable<'d>> {
        self.document.tables(&self.options.table_class)
    }

    /// Get one table by index.
    pub fn table(&self, index: usize) -> Result<HtmlTable<'d>> {
        let mut tables = self.tables();
        let count = tables.len();
        if index >= count {
            return Err(Error::TableOutOfRange(index, count));
        }
        Ok(tables.swap_remove(index))
    }

    /// Listing pass: summarize every table.
    ///
    /// A table whose rows cannot be merged still gets a summary; the problem
    /// is reported in its `issue` field.
    pub fn list(&self) -> Vec<TableSummary> {
        self.tables().iter().map(|t| self.summarize(t)).collect()
    }

    /// Summarize one table: merge rows, resolve its title, count its rows.
    pub fn summarize(&self, table: &HtmlTable<'d>) -> TableSummary {
        let row_count = table.row_count();

        let (record_count, issue) = match merge_expansion_rows(table, &self.options) {
            Ok(merges) => (Some(row_count - merges.len()), None),
            Err(err) => {
                log::warn!("{}", err);
                (None, Some(err.to_string()))
            }
        };

        TableSummary {
            index: table.index(),
            title: resolve_title(table, &self.options),
            row_count,
            record_count,
            issue,
        }
    }

    /// Extraction pass: normalize one table into a grid.
    pub fn extract(&self, index: usize) -> Result<Grid> {
        let table = self.table(index)?;
        normalize_table(&table, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TITLE_NOT_FOUND;
    use crate::parser::HtmlParser;

    const PAGE: &str = r#"<html><body>
        <h2>Filmography</h2>
        <table class="wikitable">
          <tr><th>Year</th><th>Title</th></tr>
          <tr class="vevent"><td>1991</td><td>The Silence of the Lambs</td></tr>
          <tr class="expand-child"><td>Thriller</td></tr>
        </table>
        <table class="infobox"><tr><td>skip me</td></tr></table>
        <table class="wikitable">
          <tr class="vevent"><td>broken</td></tr>
          <tr class="expand-child"><th>no td</th></tr>
        </table>
        </body></html>"#;

    #[test]
    fn test_list_tables() {
        let doc = HtmlParser::from_html(PAGE).parse();
        let listing = TableExtractor::new(&doc).list();

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].title, "Filmography");
        assert_eq!(listing[0].row_count, 3);
        assert_eq!(listing[0].record_count, Some(2));
        assert_eq!(listing[0].issue, None);
    }

    #[test]
    fn test_list_reports_merge_issue_per_table() {
        let doc = HtmlParser::from_html(PAGE).parse();
        let listing = TableExtractor::new(&doc).list();

        assert_eq!(listing[1].index, 1);
        assert_eq!(listing[1].title, "Filmography");
        assert_eq!(listing[1].row_count, 2);
        assert_eq!(listing[1].record_count, None);
        assert!(listing[1].issue.as_deref().unwrap().contains("no <td> cell"));
    }

    #[test]
    fn test_list_lenient_skips_bad_pair() {
        let doc = HtmlParser::from_html(PAGE).parse();
        let extractor = TableExtractor::with_options(&doc, ParseOptions::new().lenient());
        let listing = extractor.list();
        assert_eq!(listing[1].record_count, Some(2));
        assert_eq!(listing[1].issue, None);
    }

    #[test]
    fn test_extract_out_of_range() {
        let doc = HtmlParser::from_html(PAGE).parse();
        let result = TableExtractor::new(&doc).extract(5);
        assert!(matches!(result, Err(Error::TableOutOfRange(5, 2))));
    }

    #[test]
    fn test_extract_does_not_merge_by_default() {
        let doc = HtmlParser::from_html(PAGE).parse();
        let grid = TableExtractor::new(&doc).extract(0).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.rows[2], vec!["Thriller"]);
    }

    #[test]
    fn test_table_without_heading() {
        let doc = HtmlParser::from_html(r#"<table class="wikitable"><tr><td>x</td></tr></table>"#)
            .parse();
        let listing = TableExtractor::new(&doc).list();
        assert_eq!(listing[0].title, TITLE_NOT_FOUND);
    }
}
