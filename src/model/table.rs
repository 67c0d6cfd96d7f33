//! Recovered table structure.

use serde::{Deserialize, Serialize};

/// Placeholder cell used when padding ragged rows.
pub const CELL_PLACEHOLDER: &str = "—";

/// A table recovered from pseudo-tabular text.
///
/// Invariant: after [`TableBlock::normalize_columns`], the header and
/// every row share the same column count (the maximum seen across all
/// rows). Short rows are padded with [`CELL_PLACEHOLDER`]; long rows
/// have their overflow cells merged into the last column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    /// Header cells.
    pub headers: Vec<String>,

    /// Body rows.
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Create a new table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of columns after normalization (max across header and rows).
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// Check if the table has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Normalize every row (and the header) to the same column count,
    /// the maximum seen across the table.
    pub fn normalize_columns(&mut self) {
        self.normalize_to(self.column_count());
    }

    /// Normalize every row (and the header) to exactly `cols` columns.
    ///
    /// Ragged input is repaired rather than rejected: short rows get
    /// placeholder cells, overlong rows fold trailing cells into the
    /// last column.
    pub fn normalize_to(&mut self, cols: usize) {
        if cols == 0 {
            return;
        }
        normalize_row(&mut self.headers, cols);
        for row in &mut self.rows {
            normalize_row(row, cols);
        }
    }

    /// Render as a GFM pipe table with a separator row.
    pub fn to_gfm(&self) -> String {
        let mut out = String::new();
        push_pipe_row(&mut out, &self.headers);
        out.push('|');
        for _ in 0..self.headers.len() {
            out.push_str(" --- |");
        }
        out.push('\n');
        for row in &self.rows {
            push_pipe_row(&mut out, row);
        }
        out
    }
}

fn normalize_row(row: &mut Vec<String>, cols: usize) {
    if row.len() > cols {
        let overflow = row.split_off(cols);
        if let Some(last) = row.last_mut() {
            for cell in overflow {
                last.push(' ');
                last.push_str(&cell);
            }
        }
    }
    while row.len() < cols {
        row.push(CELL_PLACEHOLDER.to_string());
    }
}

fn push_pipe_row(out: &mut String, cells: &[String]) {
    out.push('|');
    for cell in cells {
        // Literal pipes inside a cell would break the row shape.
        let content = cell.replace('|', "/").replace('\n', " ");
        out.push(' ');
        out.push_str(content.trim());
        out.push_str(" |");
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_ragged_rows_padded_to_max() {
        let mut table = TableBlock::new(
            row(&["Part", "Function"]),
            vec![
                row(&["Cerebrum", "Thinking", "Largest"]),
                row(&["Cerebellum", "Balance"]),
            ],
        );
        table.normalize_columns();

        assert_eq!(table.headers.len(), 3);
        assert_eq!(table.headers[2], CELL_PLACEHOLDER);
        assert_eq!(table.rows[1], row(&["Cerebellum", "Balance", "—"]));
    }

    #[test]
    fn test_overflow_merged_into_last_column() {
        let mut table = TableBlock::new(
            row(&["A", "B"]),
            vec![row(&["1", "2", "3", "4"]), row(&["x"])],
        );
        table.normalize_to(2);

        assert_eq!(table.rows[0], row(&["1", "2 3 4"]));
        assert_eq!(table.rows[1], row(&["x", "—"]));
    }

    #[test]
    fn test_to_gfm() {
        let table = TableBlock::new(row(&["A", "B"]), vec![row(&["1", "2"])]);
        assert_eq!(table.to_gfm(), "| A | B |\n| --- | --- |\n| 1 | 2 |\n");
    }

    #[test]
    fn test_gfm_escapes_pipes_in_cells() {
        let table = TableBlock::new(row(&["A|B"]), vec![]);
        assert!(table.to_gfm().starts_with("| A/B |"));
    }
}
