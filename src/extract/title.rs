//! Table title resolution.
//!
//! A table's title is the nearest level-2 or level-3 heading above it in
//! document order. The search walks backward over the table's preceding
//! siblings and, once those run out, over the preceding siblings of each
//! ancestor in turn.

use regex::Regex;
use scraper::ElementRef;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

use crate::model::TITLE_NOT_FOUND;
use crate::parser::dom::has_class;
use crate::parser::{HtmlTable, ParseOptions, TitleScope};

use super::text::{collapse_whitespace, source_text_without};

fn edit_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\[\s*edit\s*\]").unwrap())
}

/// Iterator over the elements preceding a start element, nearest first.
///
/// Text nodes are skipped. Ancestors themselves are never yielded, since
/// they contain the start element rather than precede it.
pub struct PrecedingElements<'a> {
    anchor: Option<ElementRef<'a>>,
    climb: bool,
}

impl<'a> PrecedingElements<'a> {
    /// Start a backward walk from `start`.
    pub fn new(start: ElementRef<'a>, scope: TitleScope) -> Self {
        Self {
            anchor: Some(start),
            climb: scope == TitleScope::SiblingsThenAncestors,
        }
    }
}

impl<'a> Iterator for PrecedingElements<'a> {
    type Item = ElementRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let anchor = self.anchor?;

            if let Some(sibling) = anchor.prev_siblings().find_map(ElementRef::wrap) {
                self.anchor = Some(sibling);
                return Some(sibling);
            }

            self.anchor = if self.climb {
                anchor.parent().and_then(ElementRef::wrap)
            } else {
                None
            };
        }
    }
}

/// Resolve a table's display title.
///
/// Returns [`TITLE_NOT_FOUND`] when no heading precedes the table, or when
/// the nearest heading has no text once decorations are removed.
pub fn resolve_title(table: &HtmlTable<'_>, options: &ParseOptions) -> String {
    let heading = PrecedingElements::new(table.element(), options.title_scope)
        .find_map(|el| heading_of(el, options));

    match heading.map(|h| heading_text(h, options)) {
        Some(title) if !title.is_empty() => title,
        _ => {
            log::debug!("No title found for table {}", table.index());
            TITLE_NOT_FOUND.to_string()
        }
    }
}

/// Get the heading an element stands for: the element itself, or the
/// heading inside a heading wrapper.
fn heading_of<'a>(el: ElementRef<'a>, options: &ParseOptions) -> Option<ElementRef<'a>> {
    if options.is_heading_name(el.value().name()) {
        return Some(el);
    }

    let wrapper = options.heading_wrapper_class.as_deref()?;
    if !has_class(el, wrapper) {
        return None;
    }

    el.children()
        .filter_map(ElementRef::wrap)
        .find(|child| options.is_heading_name(child.value().name()))
}

/// Read a heading's text without edit links and other decorations.
fn heading_text(heading: ElementRef<'_>, options: &ParseOptions) -> String {
    let raw = source_text_without(heading, &options.decorative_classes);
    let text = edit_marker_regex().replace_all(&raw, "");
    let text = collapse_whitespace(&text);

    if options.normalize_unicode {
        text.nfc().collect()
    } else {
        text
    }
}
