//! Cell and heading text cleaning.

use scraper::node::Element;
use scraper::{ElementRef, Node};
use unicode_normalization::UnicodeNormalization;

use crate::parser::ParseOptions;

/// Elements whose text is never content.
const NON_CONTENT_TAGS: &[&str] = &["style", "script", "noscript", "template"];

/// Text runs collected under an element, with the whitespace seen at their
/// outer edges.
#[derive(Debug, Default)]
struct Runs {
    runs: Vec<String>,
    leading_space: bool,
    trailing_space: bool,
}

impl Runs {
    fn joined(&self) -> String {
        self.runs.join(" ")
    }
}

/// Compute a cell's effective text.
///
/// The cell's immediate content nodes are read in document order: text
/// contributes its trimmed text, `<br>` contributes `\n`, and any other
/// element contributes its descendant text runs joined by single spaces.
/// Pieces are separated by a space where the markup had whitespace between
/// them.
pub fn cell_text(cell: ElementRef<'_>, options: &ParseOptions) -> String {
    let mut out = String::new();
    let mut gap = false;

    for node in cell.children() {
        match node.value() {
            Node::Text(text) => {
                let run = clean_run(text);
                let starts_with_space = text.starts_with(char::is_whitespace);
                if run.is_empty() {
                    gap |= !text.is_empty();
                    continue;
                }
                push_piece(&mut out, &run, gap || starts_with_space);
                gap = text.ends_with(char::is_whitespace);
            }
            Node::Element(element) if element.name() == "br" => {
                out.push('\n');
                gap = false;
            }
            Node::Element(element) if is_skipped(element, &options.ignored_classes) => {}
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(node) else {
                    continue;
                };
                let runs = collect_runs(child, &options.ignored_classes);
                if runs.runs.is_empty() {
                    gap |= runs.leading_space;
                    continue;
                }
                push_piece(&mut out, &runs.joined(), gap || runs.leading_space);
                gap = runs.trailing_space;
            }
            _ => {}
        }
    }

    finish(out.trim(), options)
}

/// Flatten an element's text: descendant text runs, trimmed, joined by
/// single spaces. Elements carrying an ignored class are skipped.
pub fn flatten_text(el: ElementRef<'_>, options: &ParseOptions) -> String {
    let runs = collect_runs(el, &options.ignored_classes);
    finish(&runs.joined(), options)
}

/// Read an element's text as the markup lays it out, skipping elements
/// carrying any of `classes`. Adjacent runs are only separated where the
/// source has whitespace; whitespace runs collapse to one space.
pub fn source_text_without(el: ElementRef<'_>, classes: &[String]) -> String {
    let mut raw = String::new();
    let mut stack: Vec<_> = el.children().collect();
    stack.reverse();

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(element) if element.name() == "br" => raw.push(' '),
            Node::Element(element) if is_skipped(element, classes) => {}
            Node::Element(_) => {
                let start = stack.len();
                stack.extend(node.children());
                stack[start..].reverse();
            }
            _ => {}
        }
    }

    collapse_whitespace(&raw)
}

/// Collapse every whitespace run to a single space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn finish(text: &str, options: &ParseOptions) -> String {
    if options.normalize_unicode {
        text.nfc().collect()
    } else {
        text.to_string()
    }
}

fn push_piece(out: &mut String, piece: &str, spaced: bool) {
    if spaced && !out.is_empty() && !out.ends_with('\n') {
        out.push(' ');
    }
    out.push_str(piece);
}

/// Trim a text node. Whitespace runs holding a line break or tab are source
/// formatting and become one space; plain spaces are left alone.
fn clean_run(text: &str) -> String {
    let text = text.trim();
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if !ch.is_whitespace() {
            out.push(ch);
            continue;
        }

        let mut run = String::from(ch);
        while let Some(&next) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            run.push(next);
            chars.next();
        }

        if run.chars().all(|c| c == ' ') {
            out.push_str(&run);
        } else {
            out.push(' ');
        }
    }

    out
}

fn is_skipped(element: &Element, classes: &[String]) -> bool {
    NON_CONTENT_TAGS.contains(&element.name())
        || element
            .classes()
            .any(|class| classes.iter().any(|c| c == class))
}

/// Walk an element's subtree with an explicit stack, collecting text runs.
fn collect_runs(el: ElementRef<'_>, skip_classes: &[String]) -> Runs {
    let mut out = Runs::default();
    let mut first = true;
    let mut stack: Vec<_> = el.children().collect();
    stack.reverse();

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                if first {
                    out.leading_space = text.starts_with(char::is_whitespace);
                    first = false;
                }
                out.trailing_space = text.ends_with(char::is_whitespace);

                let run = clean_run(text);
                if !run.is_empty() {
                    out.runs.push(run);
                }
            }
            Node::Element(element) if is_skipped(element, skip_classes) => {}
            Node::Element(_) => {
                let start = stack.len();
                stack.extend(node.children());
                stack[start..].reverse();
            }
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::dom::is_tag;
    use scraper::Html;

    fn with_cell<F: FnOnce(ElementRef<'_>)>(inner: &str, f: F) {
        let html = Html::parse_document(&format!("<table><tr><td>{}</td></tr></table>", inner));
        let cell = html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| is_tag(*el, "td"))
            .unwrap();
        f(cell);
    }

    fn text_of(inner: &str) -> String {
        let mut out = String::new();
        with_cell(inner, |cell| out = cell_text(cell, &ParseOptions::default()));
        out
    }

    #[test]
    fn test_clean_text_is_only_trimmed() {
        assert_eq!(text_of("  Already clean text  "), "Already clean text");
        assert_eq!(text_of("two  spaces"), "two  spaces");
        assert_eq!(text_of("Already clean text"), "Already clean text");
    }

    #[test]
    fn test_line_breaks_become_newlines() {
        assert_eq!(text_of("First<br>Second<br/>Third"), "First\nSecond\nThird");
        assert_eq!(text_of("<br>Only<br>"), "Only");
    }

    #[test]
    fn test_source_newlines_collapse() {
        assert_eq!(text_of("\n  John\n  Smith\n"), "John Smith");
    }

    #[test]
    fn test_nested_markup_spacing() {
        assert_eq!(text_of("Foo <a href=\"#\">Bar</a>"), "Foo Bar");
        assert_eq!(text_of("<a href=\"#\">Paris</a>, France"), "Paris, France");
        assert_eq!(text_of("<i>The</i> <b>Film</b>"), "The Film");
        assert_eq!(text_of("<span><b>Best</b>Picture</span>"), "Best Picture");
    }

    #[test]
    fn test_list_like_content() {
        assert_eq!(
            text_of("<a>Alpha</a><br><a>Beta</a><br><a>Gamma</a>"),
            "Alpha\nBeta\nGamma"
        );
    }

    #[test]
    fn test_ignored_and_non_content_elements() {
        assert_eq!(
            text_of("<span class=\"sortkey\">Smith, John</span>John Smith"),
            "John Smith"
        );
        assert_eq!(text_of("Value<style>.x{color:red}</style>"), "Value");
    }

    #[test]
    fn test_flatten_text() {
        with_cell("  <b>One</b>\n<i> Two </i> three ", |cell| {
            assert_eq!(flatten_text(cell, &ParseOptions::default()), "One Two three");
        });
    }

    #[test]
    fn test_source_text_without_classes() {
        with_cell(
            "Early life<span class=\"mw-editsection\">[<a>edit</a>]</span>",
            |cell| {
                let classes = vec!["mw-editsection".to_string()];
                assert_eq!(source_text_without(cell, &classes), "Early life");
            },
        );
    }

    #[test]
    fn test_source_text_follows_markup_spacing() {
        with_cell("Rock<i>n</i>Roll", |cell| {
            assert_eq!(source_text_without(cell, &[]), "RocknRoll");
        });
        with_cell("\n <b>Early</b>\n  <i>life</i> ", |cell| {
            assert_eq!(source_text_without(cell, &[]), "Early life");
        });
    }

    #[test]
    fn test_unicode_normalization() {
        // "e" followed by a combining acute accent
        let decomposed = "Ame\u{301}lie";
        assert_eq!(text_of(decomposed), "Am\u{e9}lie");

        with_cell(decomposed, |cell| {
            let options = ParseOptions::new().with_unicode_normalization(false);
            assert_eq!(cell_text(cell, &options), decomposed);
        });
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
        assert_eq!(collapse_whitespace(""), "");
    }
}
