//! Table types.

use serde::{Deserialize, Serialize};

/// Title given to a table with no heading above it.
pub const TITLE_NOT_FOUND: &str = "Table Title Not Found";

/// A normalized table: rows of plain-text values.
///
/// Spanned values are already replicated into every position they cover.
/// Rows of a malformed table may be shorter than the widest row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Rows in the grid
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// Create a new empty grid.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Create a grid from rows of values.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Add a row to the grid.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Get the number of rows, empty ones included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the grid has no values at all.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// Check if every non-empty row has the same width.
    pub fn is_rectangular(&self) -> bool {
        let width = self.width();
        self.non_empty_rows().all(|row| row.len() == width)
    }

    /// Get a value by position.
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Iterate over rows that hold at least one value.
    pub fn non_empty_rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        self.rows
            .iter()
            .filter(|row| !row.is_empty())
            .map(Vec::as_slice)
    }

    /// Get a copy with every non-empty row padded to the widest row.
    pub fn padded(&self) -> Grid {
        let width = self.width();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                if !row.is_empty() {
                    row.resize(width, String::new());
                }
                row
            })
            .collect();
        Grid { rows }
    }
}

/// Listing entry for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    /// Zero-based index among the document's marker-class tables
    pub index: usize,

    /// Nearest heading above the table, or [`TITLE_NOT_FOUND`]
    pub title: String,

    /// Raw `<tr>` count
    pub row_count: usize,

    /// Rows left after folding expansion rows (None when the merge failed)
    pub record_count: Option<usize>,

    /// Problem found while merging rows, if any
    pub issue: Option<String>,
}

impl TableSummary {
    /// Check if a real heading was found for the table.
    pub fn has_title(&self) -> bool {
        self.title != TITLE_NOT_FOUND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new() {
        let grid = Grid::new();
        assert!(grid.is_empty());
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.width(), 0);
    }

    #[test]
    fn test_grid_shape() {
        let mut grid = Grid::from_rows(vec![vec!["Name", "Age"], vec!["Alice", "30"]]);
        assert!(grid.is_rectangular());
        assert_eq!(grid.get(1, 0), Some("Alice"));
        assert_eq!(grid.get(2, 0), None);

        grid.push_row(Vec::new());
        grid.push_row(vec!["Bob".to_string()]);
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.non_empty_rows().count(), 3);
        assert!(!grid.is_rectangular());
    }

    #[test]
    fn test_grid_padded_keeps_empty_rows_empty() {
        let grid = Grid::from_rows(vec![vec!["a", "b", "c"], vec![], vec!["d"]]);
        let padded = grid.padded();
        assert_eq!(padded.rows[1], Vec::<String>::new());
        assert_eq!(padded.rows[2], vec!["d", "", ""]);
        assert!(padded.is_rectangular());
    }

    #[test]
    fn test_summary_has_title() {
        let summary = TableSummary {
            index: 0,
            title: TITLE_NOT_FOUND.to_string(),
            row_count: 3,
            record_count: Some(3),
            issue: None,
        };
        assert!(!summary.has_title());
    }
}
