//! Grid normalization pass.
//!
//! Walks a table row by row with a column cursor. Cells spanning several
//! rows leave a pending record per covered column; later rows emit those
//! values when the cursor reaches the column. Cells spanning several
//! columns are emitted once per column.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::Result;
use crate::model::Grid;
use crate::parser::dom::{cells, span_attr, MAX_COLSPAN, MAX_ROWSPAN};
use crate::parser::{HtmlTable, ParseOptions};

use super::merge::{merge_expansion_rows, RowMerge};
use super::text::cell_text;

/// A value falling through from a row-spanning cell above.
#[derive(Debug, Clone)]
struct Pending {
    remaining: usize,
    value: String,
}

/// Pending records keyed by column.
#[derive(Debug, Default)]
struct PendingSpans {
    slots: BTreeMap<usize, Pending>,
}

impl PendingSpans {
    /// Take the value pending at `column` for the current row.
    fn take(&mut self, column: usize) -> Option<String> {
        let pending = self.slots.get_mut(&column)?;
        pending.remaining -= 1;
        if pending.remaining > 0 {
            return Some(pending.value.clone());
        }
        self.slots.remove(&column).map(|p| p.value)
    }

    fn register(&mut self, column: usize, remaining: usize, value: String) {
        self.slots.insert(column, Pending { remaining, value });
    }

    /// Emit pending values sitting at the cursor.
    fn fill_at_cursor(&mut self, row: &mut Vec<String>, used: &mut BTreeSet<usize>) {
        while let Some(value) = self.take(row.len()) {
            used.insert(row.len());
            row.push(value);
        }
    }

    /// Emit pending values at or beyond the cursor, in column order. Gaps
    /// before a pending column are filled with empty values.
    fn drain_trailing(&mut self, row: &mut Vec<String>, used: &mut BTreeSet<usize>) {
        while let Some(column) = self.slots.range(row.len()..).next().map(|(c, _)| *c) {
            row.resize(column, String::new());
            if let Some(value) = self.take(column) {
                used.insert(column);
                row.push(value);
            }
        }
    }

    /// Count a row that produces no output against every record.
    fn skip_row(&mut self) {
        self.slots.retain(|_, pending| {
            pending.remaining -= 1;
            pending.remaining > 0
        });
    }

    /// Count a row against records that a wider cell overlapped.
    fn expire_overlapped(&mut self, width: usize, used: &BTreeSet<usize>) {
        let overlapped: Vec<usize> = self
            .slots
            .range(..width)
            .map(|(c, _)| *c)
            .filter(|c| !used.contains(c))
            .collect();
        for column in overlapped {
            self.take(column);
        }
    }
}

/// Normalize a table into a grid.
///
/// With `merge_on_extract` set, expansion rows are folded into their primary
/// rows first.
pub fn normalize_table(table: &HtmlTable<'_>, options: &ParseOptions) -> Result<Grid> {
    let merges = if options.merge_on_extract {
        merge_expansion_rows(table, options)?
    } else {
        Vec::new()
    };
    Ok(normalize_with_merges(table, options, &merges))
}

/// Normalize a table into a grid, applying already computed row merges.
///
/// Absorbed expansion rows produce no output row; merged cells take the
/// merged text.
pub fn normalize_with_merges(
    table: &HtmlTable<'_>,
    options: &ParseOptions,
    merges: &[RowMerge],
) -> Grid {
    let absorbed: HashSet<usize> = merges.iter().map(|m| m.expansion_row).collect();
    let merged: HashMap<(usize, usize), &str> = merges
        .iter()
        .map(|m| ((m.primary_row, m.cell), m.text.as_str()))
        .collect();

    let mut pending = PendingSpans::default();
    let mut grid = Grid::new();

    for (row_index, row) in table.rows().into_iter().enumerate() {
        if absorbed.contains(&row_index) {
            // The row still sits under any span opened above it.
            pending.skip_row();
            continue;
        }

        let mut values = Vec::new();
        let mut used = BTreeSet::new();
        let mut incoming = Vec::new();

        for (cell_index, cell) in cells(row).enumerate() {
            pending.fill_at_cursor(&mut values, &mut used);

            let text = match merged.get(&(row_index, cell_index)) {
                Some(text) => text.to_string(),
                None => cell_text(cell, options),
            };
            let rowspan = span_attr(cell, "rowspan", MAX_ROWSPAN);
            let colspan = span_attr(cell, "colspan", MAX_COLSPAN);

            let start = values.len();
            if rowspan > 1 {
                for column in start..start + colspan {
                    incoming.push((column, rowspan - 1, text.clone()));
                }
            }
            values.resize(start + colspan, text);
        }

        pending.drain_trailing(&mut values, &mut used);
        pending.expire_overlapped(values.len(), &used);
        for (column, remaining, value) in incoming {
            pending.register(column, remaining, value);
        }

        grid.push_row(values);
    }

    grid
}
