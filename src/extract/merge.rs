//! Row merge pass.
//!
//! Some tables split one logical record over two adjacent rows: a primary
//! row and an expansion row holding extra detail. The merge pass pairs them
//! and computes the primary row's merged last-cell text. The tree itself is
//! left untouched; callers apply the returned records.

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::dom::{cells, has_class, is_tag, next_element_sibling};
use crate::parser::{ErrorMode, HtmlTable, ParseOptions};

use super::text::{cell_text, flatten_text};

/// One primary/expansion row pair folded together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMerge {
    /// Index of the primary row within the table's rows
    pub primary_row: usize,

    /// Index of the expansion row within the table's rows
    pub expansion_row: usize,

    /// Index of the merged cell within the primary row's cells
    pub cell: usize,

    /// Merged text of that cell
    pub text: String,
}

/// Pair every primary row with the expansion row directly after it.
///
/// A primary row whose next sibling is not an expansion row is left alone.
/// In strict mode a pair missing the cells a merge needs fails the whole
/// pass; in lenient mode that pair is skipped.
pub fn merge_expansion_rows(table: &HtmlTable<'_>, options: &ParseOptions) -> Result<Vec<RowMerge>> {
    let rows = table.rows();
    let mut merges = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        if !has_class(*row, &options.primary_row_class) {
            continue;
        }

        let Some(next) = next_element_sibling(*row) else {
            continue;
        };
        if !is_tag(next, "tr") || !has_class(next, &options.expansion_row_class) {
            continue;
        }
        let Some(expansion_row) = rows[index + 1..]
            .iter()
            .position(|r| *r == next)
            .map(|offset| index + 1 + offset)
        else {
            continue;
        };

        match merge_pair(table.index(), (index, *row), (expansion_row, next), options) {
            Ok(merge) => merges.push(merge),
            Err(err) if options.error_mode == ErrorMode::Lenient => {
                log::warn!("Skipping row merge: {}", err);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(merges)
}

fn merge_pair(
    table: usize,
    (primary_row, primary): (usize, ElementRef<'_>),
    (expansion_row, expansion): (usize, ElementRef<'_>),
    options: &ParseOptions,
) -> Result<RowMerge> {
    let detail = cells(expansion)
        .find(|c| is_tag(*c, "td"))
        .ok_or_else(|| {
            Error::mismatch(
                table,
                format!("expansion row {} has no <td> cell", expansion_row),
            )
        })?;

    let (cell, last) = cells(primary)
        .enumerate()
        .filter(|(_, c)| is_tag(*c, "td"))
        .last()
        .ok_or_else(|| {
            Error::mismatch(table, format!("primary row {} has no <td> cell", primary_row))
        })?;

    let extra = flatten_text(detail, options);
    let current = cell_text(last, options);

    let text = if current.is_empty() {
        extra
    } else if extra.is_empty() {
        current
    } else {
        format!("{} {}", current, extra)
    };

    Ok(RowMerge {
        primary_row,
        expansion_row,
        cell,
        text,
    })
}
