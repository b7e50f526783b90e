//! HTML document parser using scraper.

use std::io::Read;
use std::path::Path;

use chrono::Utc;
use scraper::{ElementRef, Html};

use crate::detect::{detect_format_from_bytes, HtmlFormat};
use crate::error::Result;
use crate::extract::text::collapse_whitespace;
use crate::model::{Document, Metadata};

use super::dom::{find_tables, is_tag};
use super::options::ParseOptions;

const TITLE_SUFFIX: &str = " - Wikipedia";

/// HTML document parser.
pub struct HtmlParser {
    source: String,
    format: Option<HtmlFormat>,
    origin: Option<String>,
    options: ParseOptions,
}

impl HtmlParser {
    /// Create a parser over HTML text.
    pub fn from_html(html: impl Into<String>) -> Self {
        Self::from_html_with_options(html, ParseOptions::default())
    }

    /// Create a parser over HTML text with custom options.
    pub fn from_html_with_options(html: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            source: html.into(),
            format: None,
            origin: None,
            options,
        }
    }

    /// Open an HTML file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an HTML file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let parser = Self::from_bytes_with_options(&data, options)?;
        Ok(parser.with_origin(path.display().to_string()))
    }

    /// Create a parser from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Create a parser from bytes with custom options.
    ///
    /// The bytes must look like HTML; they are decoded as UTF-8, replacing
    /// invalid sequences.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let format = detect_format_from_bytes(data)?;

        if let Some(ref charset) = format.charset {
            if charset != "utf-8" && charset != "utf8" {
                log::warn!("Document declares charset {}, decoding as UTF-8", charset);
            }
        }

        Ok(Self {
            source: String::from_utf8_lossy(data).into_owned(),
            format: Some(format),
            origin: None,
            options,
        })
    }

    /// Create a parser from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Create a parser from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Record where the document came from (URL or path).
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse the source into a Document.
    pub fn parse(&self) -> Document {
        let html = Html::parse_document(&self.source);

        let root = html.root_element();
        let table_count = find_tables(root, &self.options.table_class).len();
        log::debug!(
            "Found {} tables with class {:?}",
            table_count,
            self.options.table_class
        );

        let metadata = Metadata {
            title: page_title(root),
            source: self.origin.clone(),
            charset: self.format.as_ref().and_then(|f| f.charset.clone()),
            table_count,
            parsed_at: Some(Utc::now()),
        };

        Document::from_html(html, metadata)
    }
}

/// Page title from the first-heading element, falling back to `<title>`.
fn page_title(root: ElementRef<'_>) -> Option<String> {
    let heading = root
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| is_tag(*el, "h1") && el.value().id() == Some("firstHeading"));
    if let Some(heading) = heading {
        let text = collapse_whitespace(&heading.text().collect::<Vec<_>>().join(" "));
        if !text.is_empty() {
            return Some(text);
        }
    }

    let title = root
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| is_tag(*el, "title"))?;
    let mut text = collapse_whitespace(&title.text().collect::<String>());
    if let Some(stripped) = text.strip_suffix(TITLE_SUFFIX) {
        text = stripped.trim_end().to_string();
    }

    (!text.is_empty()).then_some(text)
}
