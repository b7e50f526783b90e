//! Error types for unwiki library.

use std::io;
use thiserror::Error;

/// Result type alias for unwiki operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting tables.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as HTML.
    #[error("Unknown input format: not an HTML document")]
    UnknownFormat,

    /// A table row does not have the cells a row merge needs.
    #[error("Table {table}: structural mismatch: {reason}")]
    StructuralMismatch {
        /// Index of the offending table
        table: usize,
        /// What was missing
        reason: String,
    },

    /// Table index is out of range.
    #[error("Table {0} is out of range (document has {1} tables)")]
    TableOutOfRange(usize, usize),

    /// The fetch target is not a usable http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The upstream server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Http {
        /// Status code returned
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// Transport-level failure while fetching a page.
    #[cfg(feature = "fetch")]
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Error during rendering (CSV, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn mismatch(table: usize, reason: impl Into<String>) -> Self {
        Error::StructuralMismatch {
            table,
            reason: reason.into(),
        }
    }
}
