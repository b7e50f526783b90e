//! HTML input detection.

use crate::error::{Error, Result};
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::OnceLock;

/// Information about an HTML payload, gathered from its first bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlFormat {
    /// Whether the payload starts with a `<!DOCTYPE html>` declaration
    pub doctype: bool,
    /// Character set declared in a `<meta>` tag, lowercased
    pub charset: Option<String>,
}

impl std::fmt::Display for HtmlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.charset {
            Some(ref charset) => write!(f, "HTML ({})", charset),
            None => write!(f, "HTML"),
        }
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const SNIFF_LEN: usize = 1024;

fn charset_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)<meta[^>]*charset\s*=\s*["']?([a-z0-9_\-]+)"#).unwrap()
    })
}

/// Detect HTML from a file path.
///
/// Only the first kilobyte of the file is read.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<HtmlFormat> {
    let file = File::open(path)?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    BufReader::new(file)
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)?;
    detect_format_from_bytes(&head)
}

/// Detect HTML from bytes.
///
/// # Returns
/// * `Ok(HtmlFormat)` if the first non-whitespace byte opens a tag
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<HtmlFormat> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .ok_or(Error::UnknownFormat)?;

    let head = &data[start..data.len().min(start + SNIFF_LEN)];
    if head.first() != Some(&b'<') {
        return Err(Error::UnknownFormat);
    }

    let head = String::from_utf8_lossy(head);
    let doctype = head
        .get(..14)
        .map(|s| s.eq_ignore_ascii_case("<!doctype html"))
        .unwrap_or(false);
    let charset = charset_regex()
        .captures(&head)
        .map(|caps| caps[1].to_ascii_lowercase());

    Ok(HtmlFormat { doctype, charset })
}

/// Check if bytes look like an HTML document or fragment.
pub fn is_html_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
