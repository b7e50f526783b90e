//! Document model types for extracted tables.
//!
//! The document wraps the parsed HTML tree; grids and summaries are the
//! plain-data results of the extraction passes and serialize with serde.

mod document;
mod table;

pub use document::{Document, Metadata};
pub use table::{Grid, TableSummary, TITLE_NOT_FOUND};
