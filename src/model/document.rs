//! Document-level types.

use chrono::{DateTime, Utc};
use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::parser::{find_tables, HtmlTable};

/// A parsed HTML page.
///
/// The tree is immutable; every pass reads it without modification, so one
/// document can serve both the listing and the extraction pass.
#[derive(Debug)]
pub struct Document {
    html: Html,

    /// Page metadata (title, source, etc.)
    pub metadata: Metadata,
}

impl Document {
    /// Wrap a parsed tree together with its metadata.
    pub fn from_html(html: Html, metadata: Metadata) -> Self {
        Self { html, metadata }
    }

    /// Get the underlying HTML tree.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Find the tables carrying `class`, in document order.
    pub fn tables(&self, class: &str) -> Vec<HtmlTable<'_>> {
        find_tables(self.html.root_element(), class)
    }

    /// Get the page title, if one was found.
    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }
}

/// Page metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Page title
    pub title: Option<String>,

    /// Where the page came from (URL or file path)
    pub source: Option<String>,

    /// Character set declared by the page
    pub charset: Option<String>,

    /// Number of tables carrying the marker class
    pub table_count: usize,

    /// When the page was parsed
    pub parsed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_tables() {
        let html = Html::parse_document(
            r#"<table class="wikitable"><tr><td>a</td></tr></table>
               <table><tr><td>b</td></tr></table>"#,
        );
        let doc = Document::from_html(html, Metadata::default());
        assert_eq!(doc.tables("wikitable").len(), 1);
        assert_eq!(doc.tables("missing").len(), 0);
        assert_eq!(doc.title(), None);
    }

    #[test]
    fn test_metadata_serialize() {
        let metadata = Metadata {
            title: Some("Example".to_string()),
            table_count: 2,
            ..Default::default()
        };
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains("\"title\":\"Example\""));
        assert!(json.contains("\"table_count\":2"));
    }
}
