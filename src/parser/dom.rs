//! Table-oriented navigation over the parsed HTML tree.

use scraper::ElementRef;

/// Browsers clamp `colspan` to this value.
pub const MAX_COLSPAN: usize = 1000;

/// Browsers clamp `rowspan` to this value.
pub const MAX_ROWSPAN: usize = 65534;

/// A marker-class table inside a parsed document.
///
/// The index is the table's zero-based position among all tables carrying
/// the marker class, in document order.
#[derive(Debug, Clone, Copy)]
pub struct HtmlTable<'a> {
    index: usize,
    element: ElementRef<'a>,
}

impl<'a> HtmlTable<'a> {
    pub(crate) fn new(index: usize, element: ElementRef<'a>) -> Self {
        Self { index, element }
    }

    /// Get the table's index within its document.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the `<table>` element.
    pub fn element(&self) -> ElementRef<'a> {
        self.element
    }

    /// Get the rows owned by this table, in document order.
    ///
    /// Rows inside `<thead>`, `<tbody>` and `<tfoot>` are included; rows of
    /// nested tables are not.
    pub fn rows(&self) -> Vec<ElementRef<'a>> {
        self.element
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| is_tag(*el, "tr") && owning_table(*el) == Some(self.element))
            .collect()
    }

    /// Get the raw `<tr>` count.
    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    /// Check if any cell spans more than one row or column.
    pub fn has_merged_cells(&self) -> bool {
        self.rows().into_iter().flat_map(cells).any(|cell| {
            span_attr(cell, "rowspan", MAX_ROWSPAN) > 1
                || span_attr(cell, "colspan", MAX_COLSPAN) > 1
        })
    }
}

/// Find all tables carrying `class` under `root`, in document order.
pub fn find_tables<'a>(root: ElementRef<'a>, class: &str) -> Vec<HtmlTable<'a>> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| is_tag(*el, "table") && has_class(*el, class))
        .enumerate()
        .map(|(index, element)| HtmlTable::new(index, element))
        .collect()
}

/// Check an element's tag name.
pub fn is_tag(el: ElementRef<'_>, name: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(name)
}

/// Check if an element carries a class.
pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Get the cells (`<td>` and `<th>`) of a row, in document order.
pub fn cells<'a>(row: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| is_tag(*el, "td") || is_tag(*el, "th"))
}

/// Get the next element sibling, skipping text and comments.
pub fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Read a span attribute.
///
/// Missing, non-numeric, zero and negative values all count as 1.
pub fn span_attr(cell: ElementRef<'_>, name: &str, max: usize) -> usize {
    let Some(raw) = cell.value().attr(name) else {
        return 1;
    };

    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 => (n as usize).min(max),
        _ => {
            log::debug!("Malformed {} value {:?}, using 1", name, raw);
            1
        }
    }
}

fn owning_table(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| is_tag(*a, "table"))
}
