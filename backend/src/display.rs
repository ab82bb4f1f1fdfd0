//! Read-only text rendering of a normalized table.

use crate::models::NormalizedTable;

/// Cells wider than this are cut and end with `…`.
const MAX_CELL_WIDTH: usize = 40;

/// Render `table` as an aligned text grid, showing at most `limit` rows.
pub fn render_table(table: &NormalizedTable, limit: Option<usize>) -> String {
    if table.column_count() == 0 {
        return "(no matching columns)\n".to_string();
    }

    let shown = limit.unwrap_or(usize::MAX).min(table.row_count());
    let rows = &table.rows()[..shown];

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .chain(std::iter::once(name))
                .map(|cell| clip(cell).chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, table.columns(), &widths);

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&separator.join("-+-"));
    out.push('\n');

    for row in rows {
        push_line(&mut out, row, &widths);
    }

    let hidden = table.row_count() - shown;
    if hidden > 0 {
        out.push_str(&format!("... {} more rows\n", hidden));
    }
    out.push_str(&format!(
        "({} rows, {} columns)\n",
        table.row_count(),
        table.column_count()
    ));
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let cell = clip(cells.get(i).map(String::as_str).unwrap_or(""));
            let pad = w.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

fn clip(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let mut clipped: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
    clipped.push('…');
    clipped
}
