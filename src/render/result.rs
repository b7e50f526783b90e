//! Rendered output with a download name.

use serde::{Deserialize, Serialize};

/// Stem used when the page title is unknown.
const FALLBACK_STEM: &str = "wikipedia";

/// A rendered table ready to be written or served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content
    pub content: String,

    /// Suggested file name
    pub filename: String,

    /// MIME type of the content
    pub mime_type: String,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(
        content: impl Into<String>,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Suggested CSV file name for a table: `<title>_table_<index>.csv`.
pub fn filename_hint(page_title: Option<&str>, index: usize) -> String {
    filename_with_extension(page_title, index, "csv")
}

/// Suggested file name for a table with the given extension.
pub fn filename_with_extension(page_title: Option<&str>, index: usize, ext: &str) -> String {
    let stem = page_title
        .map(sanitize_stem)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    format!("{}_table_{}.{}", stem, index, ext)
}

/// Keep letters, digits, `-` and `_`; whitespace runs become one `_`.
fn sanitize_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() || ch == '-' {
            out.push(ch);
            last_us = false;
        } else if ch.is_whitespace() || ch == '_' {
            if !last_us {
                out.push('_');
                last_us = true;
            }
        }
    }
    out.trim_matches('_').to_string()
}
