//! Benchmarks for unwiki extraction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic pages with span-heavy tables.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a page with `tables` tables of `rows` rows each. Every fourth
/// row opens a three-row span in the first column, and every row has a
/// two-column span at its end.
fn create_test_page(tables: usize, rows: usize) -> String {
    let mut html = String::from("<html><head><title>Benchmark - Wikipedia</title></head><body>");

    for t in 0..tables {
        html.push_str(&format!(
            "<div class=\"mw-heading mw-heading2\"><h2>Section {}</h2></div>",
            t
        ));
        html.push_str("<table class=\"wikitable\"><tr><th>Year</th><th>Title</th><th colspan=\"2\">Notes</th></tr>");

        for r in 0..rows {
            html.push_str("<tr class=\"vevent\">");
            if r % 4 == 0 {
                html.push_str(&format!("<td rowspan=\"3\">{}</td>", 1990 + r));
            } else if r % 4 == 3 {
                html.push_str(&format!("<td>{}</td>", 1990 + r));
            }
            html.push_str(&format!(
                "<td><i><a href=\"/wiki/Film_{r}\">Film {r}</a></i></td><td colspan=\"2\">Note<br>line</td></tr>"
            ));
            if r % 10 == 0 {
                html.push_str("<tr class=\"expand-child\"><td colspan=\"4\">Extra detail</td></tr>");
            }
        }

        html.push_str("</table>");
    }

    html.push_str("</body></html>");
    html
}

/// Benchmark input detection.
fn bench_format_detection(c: &mut Criterion) {
    let page = create_test_page(1, 10);
    let not_html = b"%PDF-1.7 not a web page";

    c.bench_function("detect_html", |b| {
        b.iter(|| unwiki::detect_format_from_bytes(black_box(page.as_bytes())).unwrap());
    });

    c.bench_function("detect_non_html", |b| {
        b.iter(|| unwiki::detect_format_from_bytes(black_box(not_html)).is_err());
    });
}

/// Benchmark the listing pass at various sizes.
fn bench_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("listing");

    for table_count in [1, 10, 50].iter() {
        let doc = unwiki::parse_html(&create_test_page(*table_count, 20));

        group.bench_function(format!("{}_tables", table_count), |b| {
            b.iter(|| unwiki::list_tables(black_box(&doc)));
        });
    }

    group.finish();
}

/// Benchmark grid normalization and CSV output at various sizes.
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    for row_count in [10, 100, 1000].iter() {
        let doc = unwiki::parse_html(&create_test_page(1, *row_count));

        group.bench_function(format!("{}_rows", row_count), |b| {
            b.iter(|| unwiki::table_to_csv(black_box(&doc), 0).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_format_detection, bench_listing, bench_extraction);
criterion_main!(benches);
