//! Domain models for the import/reorder/export flow.
//!
//! - [`SheetGrid`] - rectangular grid of display strings read from a worksheet
//! - [`HeaderRow`] - 1-based position of the column-name row
//! - [`Table`] - raw table: column names plus string rows
//! - [`NormalizedTable`] - table restricted to and ordered by the reference columns

use serde::Serialize;

// =============================================================================
// Sheet Grid
// =============================================================================

/// Cell text of a worksheet from A1 to its last used cell.
///
/// Every row has exactly `width` cells; cells never written are empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    /// Worksheet name (file stem for CSV input).
    pub name: String,
    cells: Vec<Vec<String>>,
    width: usize,
}

impl SheetGrid {
    /// Build a grid from ragged rows, padding short rows with empty cells.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let cells = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self {
            name: name.into(),
            cells,
            width,
        }
    }

    /// Number of rows (R).
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns (C).
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() || self.width == 0
    }

    /// Text of a cell by 1-based row and column; empty when out of range.
    pub fn text(&self, row: usize, col: usize) -> &str {
        if row == 0 || col == 0 {
            return "";
        }
        self.cells
            .get(row - 1)
            .and_then(|r| r.get(col - 1))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// A full row by 1-based index.
    pub fn row(&self, row: usize) -> Option<&[String]> {
        row.checked_sub(1)
            .and_then(|i| self.cells.get(i))
            .map(Vec::as_slice)
    }
}

// =============================================================================
// Header Row
// =============================================================================

/// 1-based row index of the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct HeaderRow(usize);

impl HeaderRow {
    /// Fallback used when the sentinel is never found.
    pub const FIRST: HeaderRow = HeaderRow(1);

    /// Create from a 1-based index. Zero is clamped to row 1.
    pub fn new(row: usize) -> Self {
        Self(row.max(1))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for HeaderRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Tables
// =============================================================================

/// Raw table as read from the source file.
///
/// Column names may repeat or be blank. Every row has one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of the first column with this exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// A table filtered to reference columns and ordered by them.
///
/// Only [`crate::transform::reorder`] builds one, so the column set is always a
/// subset of the reference list, in reference order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedTable(Table);

impl NormalizedTable {
    pub(crate) fn from_table(table: Table) -> Self {
        Self(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.0.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.0.rows
    }

    pub fn row_count(&self) -> usize {
        self.0.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.0.column_count()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.0.column_index(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.rows.is_empty()
    }

    pub fn as_table(&self) -> &Table {
        &self.0
    }

    pub fn into_table(self) -> Table {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_grid_pads_short_rows() {
        let grid = SheetGrid::from_rows(
            "Hoja1",
            vec![strings(&["a", "b", "c"]), strings(&["d"])],
        );
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.text(2, 1), "d");
        assert_eq!(grid.text(2, 3), "");
    }

    #[test]
    fn test_grid_text_is_one_based() {
        let grid = SheetGrid::from_rows("s", vec![strings(&["x", "y"])]);
        assert_eq!(grid.text(1, 1), "x");
        assert_eq!(grid.text(1, 2), "y");
        assert_eq!(grid.text(0, 1), "");
        assert_eq!(grid.text(5, 5), "");
        assert!(grid.row(0).is_none());
    }

    #[test]
    fn test_empty_grid() {
        assert!(SheetGrid::from_rows("s", vec![]).is_empty());
        assert!(SheetGrid::from_rows("s", vec![vec![]]).is_empty());
    }

    #[test]
    fn test_header_row_clamps_zero() {
        assert_eq!(HeaderRow::new(0), HeaderRow::FIRST);
        assert_eq!(HeaderRow::new(4).get(), 4);
    }

    #[test]
    fn test_normalized_serializes_like_table() {
        let table = Table::new(strings(&["Total"]), vec![strings(&["10"])]);
        let normalized = NormalizedTable::from_table(table.clone());
        assert_eq!(
            serde_json::to_value(&normalized).unwrap(),
            serde_json::to_value(&table).unwrap()
        );
    }
}
