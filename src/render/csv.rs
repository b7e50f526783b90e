//! Delimited text output.

use std::io::{self, Write};

use crate::error::{Error, Result};
use crate::model::Grid;

use super::RenderOptions;

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(w: &mut W, row: &[String], options: &RenderOptions) -> io::Result<()> {
    let sep = options.delimiter.as_char();

    // A lone empty field would otherwise read back as an empty line.
    if let [only] = row {
        if only.is_empty() {
            return write!(w, "\"\"{}", options.line_ending.as_str());
        }
    }

    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", sep)?;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(options.line_ending.as_str().as_bytes())
}

/// Write a grid as delimited text, one record per non-empty row.
pub fn write_csv<W: Write>(writer: &mut W, grid: &Grid, options: &RenderOptions) -> Result<()> {
    let padded;
    let grid = if options.pad_rows {
        padded = grid.padded();
        &padded
    } else {
        grid
    };

    for row in grid.non_empty_rows() {
        write_row(writer, row, options)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render a grid as delimited text.
pub fn to_csv(grid: &Grid, options: &RenderOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, grid, options)?;
    String::from_utf8(buf).map_err(|e| Error::Render(format!("CSV output is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{LineEnding, RenderOptions};

    #[test]
    fn test_plain_rows() {
        let grid = Grid::from_rows(vec![vec!["Year", "Title"], vec!["1991", "Lambs"]]);
        let csv = to_csv(&grid, &RenderOptions::default()).unwrap();
        assert_eq!(csv, "Year,Title\r\n1991,Lambs\r\n");
    }

    #[test]
    fn test_quoting() {
        let grid = Grid::from_rows(vec![vec!["Paris, France", "say \"hi\"", "a\nb", "plain"]]);
        let csv = to_csv(&grid, &RenderOptions::default()).unwrap();
        assert_eq!(csv, "\"Paris, France\",\"say \"\"hi\"\"\",\"a\nb\",plain\r\n");
    }

    #[test]
    fn test_empty_rows_skipped() {
        let grid = Grid::from_rows(vec![vec!["a"], vec![], vec!["b"]]);
        let csv = to_csv(&grid, &RenderOptions::new().with_line_ending(LineEnding::Lf)).unwrap();
        assert_eq!(csv, "a\nb\n");
    }

    #[test]
    fn test_single_empty_field_is_quoted() {
        let grid = Grid::from_rows(vec![vec![""], vec!["", "x"]]);
        let csv = to_csv(&grid, &RenderOptions::new().with_line_ending(LineEnding::Lf)).unwrap();
        assert_eq!(csv, "\"\"\n,x\n");
    }

    #[test]
    fn test_tsv_quotes_only_on_tab() {
        let grid = Grid::from_rows(vec![vec!["a,b", "c\td"]]);
        let options = RenderOptions::new().tsv().with_line_ending(LineEnding::Lf);
        assert_eq!(to_csv(&grid, &options).unwrap(), "a,b\t\"c\td\"\n");
    }

    #[test]
    fn test_padding() {
        let grid = Grid::from_rows(vec![vec!["a", "b", "c"], vec!["d"]]);
        let options = RenderOptions::new()
            .with_padding(true)
            .with_line_ending(LineEnding::Lf);
        assert_eq!(to_csv(&grid, &options).unwrap(), "a,b,c\nd,,\n");
    }
}
