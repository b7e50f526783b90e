//! # unwiki
//!
//! Wiki table extraction library for Rust.
//!
//! This library finds the data tables of a wiki article, gives each one a
//! title taken from the section heading above it, and flattens any table
//! into a rectangular grid of plain text, ready to be written as CSV.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unwiki::{parse_file, render};
//!
//! fn main() -> unwiki::Result<()> {
//!     // Parse a saved article
//!     let doc = parse_file("Jodie_Foster_filmography.html")?;
//!
//!     // List its tables
//!     for table in unwiki::list_tables(&doc) {
//!         println!("{}: {} ({} rows)", table.index, table.title, table.row_count);
//!     }
//!
//!     // Write the first one as CSV
//!     let grid = unwiki::extract_table(&doc, 0)?;
//!     let csv = render::to_csv(&grid, &render::RenderOptions::default())?;
//!     println!("{}", csv);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Table listing**: Titles from the nearest section heading, row counts
//! - **Span normalization**: `rowspan`/`colspan` values replicated into every
//!   position they cover
//! - **Row merging**: Expansion rows folded into their primary rows
//! - **Fetching**: Pages downloaded over HTTP (feature `fetch`)

pub mod detect;
pub mod error;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_html_bytes, HtmlFormat};
pub use error::{Error, Result};
pub use extract::{RowMerge, TableExtractor};
#[cfg(feature = "fetch")]
pub use fetch::FetchOptions;
pub use model::{Document, Grid, Metadata, TableSummary, TITLE_NOT_FOUND};
pub use parser::{ErrorMode, HtmlParser, ParseOptions, TitleScope};
pub use render::{Delimiter, JsonFormat, LineEnding, RenderOptions, RenderResult};

use std::io::Read;
use std::path::Path;

/// Parse an HTML string.
///
/// # Example
///
/// ```
/// let doc = unwiki::parse_html("<h2>Cast</h2><table class=\"wikitable\"></table>");
/// assert_eq!(doc.metadata.table_count, 1);
/// ```
pub fn parse_html(html: &str) -> Document {
    HtmlParser::from_html(html).parse()
}

/// Parse a saved HTML file.
///
/// # Example
///
/// ```no_run
/// use unwiki::parse_file;
///
/// let doc = parse_file("article.html").unwrap();
/// println!("Tables: {}", doc.metadata.table_count);
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    Ok(HtmlParser::open(path)?.parse())
}

/// Parse a saved HTML file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    Ok(HtmlParser::open_with_options(path, options)?.parse())
}

/// Parse HTML from bytes.
///
/// Fails with [`Error::UnknownFormat`] when the bytes do not look like HTML.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    Ok(HtmlParser::from_bytes(data)?.parse())
}

/// Parse HTML from a reader.
///
/// # Example
///
/// ```no_run
/// use unwiki::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("article.html").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    Ok(HtmlParser::from_reader(reader)?.parse())
}

/// Fetch and parse a page with default options.
///
/// # Example
///
/// ```no_run
/// let doc = unwiki::fetch_document("https://en.wikipedia.org/wiki/Jodie_Foster").unwrap();
/// ```
#[cfg(feature = "fetch")]
pub fn fetch_document(url: &str) -> Result<Document> {
    fetch::fetch_document(url, ParseOptions::default(), &FetchOptions::default())
}

/// List a document's tables with default options.
pub fn list_tables(doc: &Document) -> Vec<TableSummary> {
    TableExtractor::new(doc).list()
}

/// Normalize one of a document's tables with default options.
pub fn extract_table(doc: &Document, index: usize) -> Result<Grid> {
    TableExtractor::new(doc).extract(index)
}

/// Render one of a document's tables as CSV with default options.
///
/// # Example
///
/// ```
/// let doc = unwiki::parse_html(
///     r#"<table class="wikitable"><tr><th>Year</th></tr><tr><td>1991</td></tr></table>"#,
/// );
/// assert_eq!(unwiki::table_to_csv(&doc, 0)?, "Year\r\n1991\r\n");
/// # Ok::<(), unwiki::Error>(())
/// ```
pub fn table_to_csv(doc: &Document, index: usize) -> Result<String> {
    let grid = extract_table(doc, index)?;
    render::to_csv(&grid, &RenderOptions::default())
}

/// Builder for parsing pages and exporting their tables.
///
/// # Example
///
/// ```no_run
/// use unwiki::Unwiki;
///
/// let csv = Unwiki::new()
///     .lenient()
///     .with_merge_rows(true)
///     .tsv()
///     .parse("article.html")?
///     .to_csv(0)?;
/// # Ok::<(), unwiki::Error>(())
/// ```
pub struct Unwiki {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    #[cfg(feature = "fetch")]
    fetch_options: FetchOptions,
}

impl Unwiki {
    /// Create a new Unwiki builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
            #[cfg(feature = "fetch")]
            fetch_options: FetchOptions::default(),
        }
    }

    /// Enable lenient mode: skip row merges that cannot be made.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set the class marking data tables.
    pub fn with_table_class(mut self, class: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_table_class(class);
        self
    }

    /// Only search a table's own preceding siblings for its title.
    pub fn siblings_only(mut self) -> Self {
        self.parse_options = self.parse_options.siblings_only();
        self
    }

    /// Fold expansion rows into their primary rows when extracting.
    pub fn with_merge_rows(mut self, merge: bool) -> Self {
        self.parse_options = self.parse_options.with_merge_on_extract(merge);
        self
    }

    /// Write tab-separated output.
    pub fn tsv(mut self) -> Self {
        self.render_options = self.render_options.tsv();
        self
    }

    /// Set the output line ending.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.render_options = self.render_options.with_line_ending(line_ending);
        self
    }

    /// Pad rows to the widest row.
    pub fn with_padding(mut self, pad: bool) -> Self {
        self.render_options = self.render_options.with_padding(pad);
        self
    }

    /// Replace the parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the user agent sent when fetching.
    #[cfg(feature = "fetch")]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.fetch_options = self.fetch_options.with_user_agent(user_agent);
        self
    }

    /// Set the fetch options.
    #[cfg(feature = "fetch")]
    pub fn with_fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }

    /// Parse a saved HTML file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnwikiResult> {
        let parser = HtmlParser::open_with_options(path, self.parse_options.clone())?;
        Ok(self.wrap(parser.parse()))
    }

    /// Parse HTML from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UnwikiResult> {
        let parser = HtmlParser::from_bytes_with_options(data, self.parse_options.clone())?;
        Ok(self.wrap(parser.parse()))
    }

    /// Parse an HTML string.
    pub fn parse_html(self, html: &str) -> UnwikiResult {
        let document = HtmlParser::from_html_with_options(html, self.parse_options.clone()).parse();
        self.wrap(document)
    }

    /// Fetch and parse a page.
    #[cfg(feature = "fetch")]
    pub fn fetch(self, url: &str) -> Result<UnwikiResult> {
        let document = fetch::fetch_document(url, self.parse_options.clone(), &self.fetch_options)?;
        Ok(self.wrap(document))
    }

    fn wrap(self, document: Document) -> UnwikiResult {
        UnwikiResult {
            document,
            parse_options: self.parse_options,
            render_options: self.render_options,
        }
    }
}

impl Default for Unwiki {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a page.
pub struct UnwikiResult {
    /// The parsed document
    pub document: Document,
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl UnwikiResult {
    /// Get an extractor over the document.
    pub fn extractor(&self) -> TableExtractor<'_> {
        TableExtractor::with_options(&self.document, self.parse_options.clone())
    }

    /// List the document's tables.
    pub fn list(&self) -> Vec<TableSummary> {
        self.extractor().list()
    }

    /// Normalize one table into a grid.
    pub fn extract(&self, index: usize) -> Result<Grid> {
        self.extractor().extract(index)
    }

    /// Render one table as delimited text.
    pub fn to_csv(&self, index: usize) -> Result<String> {
        let grid = self.extract(index)?;
        render::to_csv(&grid, &self.render_options)
    }

    /// Render one table as JSON.
    pub fn to_json(&self, index: usize, format: JsonFormat) -> Result<String> {
        let grid = self.extract(index)?;
        render::to_json(&grid, format)
    }

    /// Render one table with a suggested file name and MIME type.
    pub fn export(&self, index: usize) -> Result<RenderResult> {
        let content = self.to_csv(index)?;
        let filename = render::filename_with_extension(
            self.document.title(),
            index,
            self.render_options.extension(),
        );
        Ok(RenderResult::new(
            content,
            filename,
            self.render_options.mime_type(),
        ))
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
