//! Integration tests for reading pages from disk.

use std::fs;
use std::io::Write;

use unwiki::{detect_format_from_path, parse_file, parse_reader, Error, Unwiki};

const PAGE: &str = r#"<!DOCTYPE html>
<html><head><meta charset="UTF-8"><title>Saved page - Wikipedia</title></head>
<body><h3>Results</h3><table class="wikitable"><tr><td>1</td><td>2</td></tr></table></body></html>"#;

#[test]
fn test_parse_saved_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.html");
    fs::write(&path, PAGE).unwrap();

    let doc = parse_file(&path).unwrap();
    assert_eq!(doc.title(), Some("Saved page"));
    assert_eq!(doc.metadata.table_count, 1);
    assert_eq!(
        doc.metadata.source.as_deref(),
        Some(path.display().to_string().as_str())
    );
    assert!(doc.metadata.parsed_at.is_some());
}

#[test]
fn test_detect_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PAGE.as_bytes()).unwrap();

    let format = detect_format_from_path(file.path()).unwrap();
    assert!(format.doctype);
    assert_eq!(format.charset.as_deref(), Some("utf-8"));
}

#[test]
fn test_parse_non_html_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"Year,Title\n1991,Lambs\n").unwrap();

    assert!(matches!(parse_file(file.path()), Err(Error::UnknownFormat)));
}

#[test]
fn test_parse_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = parse_file(dir.path().join("missing.html"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_parse_reader() {
    let doc = parse_reader(PAGE.as_bytes()).unwrap();
    assert_eq!(unwiki::list_tables(&doc)[0].title, "Results");
}

#[test]
fn test_builder_parse_file_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.html");
    fs::write(&path, PAGE).unwrap();

    let csv = Unwiki::new().tsv().parse(&path).unwrap().to_csv(0).unwrap();
    assert_eq!(csv, "1\t2\r\n");
}
