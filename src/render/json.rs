//! JSON rendering.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a grid, listing or metadata to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Grid, TableSummary};

    #[test]
    fn test_grid_to_json_pretty() {
        let grid = Grid::from_rows(vec![vec!["a", "b"]]);
        let json = to_json(&grid, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"rows\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_listing_to_json_compact() {
        let listing = vec![TableSummary {
            index: 0,
            title: "Films".to_string(),
            row_count: 3,
            record_count: Some(2),
            issue: None,
        }];
        let json = to_json(&listing, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"title\":\"Films\""));
        assert!(json.contains("\"row_count\":3"));
    }
}
