//! Raw table materialization from a sheet grid.

use crate::models::{HeaderRow, SheetGrid, Table};

/// Build the raw table below `header`.
///
/// Column names are the header row's cells as-is (blank and repeated names are
/// kept). A data row whose first cell is empty or whitespace-only is dropped;
/// every other row is copied verbatim.
pub fn materialize(grid: &SheetGrid, header: HeaderRow) -> Table {
    let header_row = header.get();
    let columns: Vec<String> = (1..=grid.width())
        .map(|col| grid.text(header_row, col).to_string())
        .collect();

    let rows = (header_row + 1..=grid.height())
        .filter_map(|row| grid.row(row))
        .filter(|cells| !is_blank_row(cells))
        .map(|cells| cells.to_vec())
        .collect();

    Table::new(columns, rows)
}

fn is_blank_row(cells: &[String]) -> bool {
    cells.first().map_or(true, |first| first.trim().is_empty())
}
