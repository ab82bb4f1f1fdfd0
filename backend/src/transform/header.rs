//! Header row detection.

use crate::models::{HeaderRow, SheetGrid};

/// Find the first row whose column-1 text equals `sentinel` exactly.
///
/// Falls back to row 1 when no row matches. The comparison is case-sensitive
/// and untrimmed, so `" Comprobante"` does not match `"Comprobante"`.
pub fn detect_header_row(grid: &SheetGrid, sentinel: &str) -> HeaderRow {
    (1..=grid.height())
        .find(|&row| grid.text(row, 1) == sentinel)
        .map(HeaderRow::new)
        .unwrap_or(HeaderRow::FIRST)
}
