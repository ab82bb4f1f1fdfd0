//! High-level import API: file → grid → raw table → normalized table.
//!
//! # Example
//!
//! ```rust,ignore
//! use colreorder::{import, ReportProfile};
//! use std::path::Path;
//!
//! let profile = ReportProfile::default();
//! let table = import(Path::new("ventas.xlsx"), &profile)?;
//! println!("{} rows, columns: {}", table.row_count(), table.columns().join(", "));
//! ```

use serde::Serialize;
use std::path::Path;

use crate::error::ImportResult;
use crate::logs::{log_info, log_info_indent, log_success};
use crate::models::{HeaderRow, NormalizedTable, SheetGrid};
use crate::profile::ReportProfile;
use crate::reader::read_first_sheet;

use super::header::detect_header_row;
use super::materialize::materialize;
use super::reorder::{reorder_with_report, ReorderReport};

/// Everything learned while importing one file.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub table: NormalizedTable,
    pub info: SourceInfo,
    pub report: ReorderReport,
}

/// Source sheet information
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub sheet: String,
    pub header_row: HeaderRow,
    /// Whether the sentinel was found (false means the row-1 fallback was used)
    pub sentinel_found: bool,
    pub raw_columns: Vec<String>,
    pub raw_row_count: usize,
}

/// Import a spreadsheet and normalize it against `profile`.
pub fn import(path: &Path, profile: &ReportProfile) -> ImportResult<NormalizedTable> {
    import_detailed(path, profile).map(|outcome| outcome.table)
}

/// Import a spreadsheet, returning the table with source details.
pub fn import_detailed(path: &Path, profile: &ReportProfile) -> ImportResult<ImportOutcome> {
    log_info(format!("📖 Reading {}", path.display()));
    let grid = read_first_sheet(path)?;
    log_success(format!(
        "Sheet '{}': {} rows x {} columns",
        grid.name,
        grid.height(),
        grid.width()
    ));

    let outcome = normalize_grid(&grid, profile);

    if outcome.info.sentinel_found {
        log_success(format!(
            "Header '{}' found on row {}",
            profile.sentinel, outcome.info.header_row
        ));
    } else {
        log_info(format!(
            "Header '{}' not found, using row 1",
            profile.sentinel
        ));
    }
    log_info_indent(
        format!("{} data rows after skipping blank rows", outcome.info.raw_row_count),
        1,
    );
    log_success(format!(
        "{} of {} columns kept: {}",
        outcome.report.kept.len(),
        outcome.info.raw_columns.len(),
        outcome.report.kept.join(", ")
    ));

    Ok(outcome)
}

/// Run header detection, materialization and reorder on an in-memory grid.
pub fn normalize_grid(grid: &SheetGrid, profile: &ReportProfile) -> ImportOutcome {
    let header_row = detect_header_row(grid, &profile.sentinel);
    let sentinel_found = grid.text(header_row.get(), 1) == profile.sentinel;

    let raw = materialize(grid, header_row);
    let (table, report) = reorder_with_report(&raw, &profile.columns);

    ImportOutcome {
        table,
        info: SourceInfo {
            sheet: grid.name.clone(),
            header_row,
            sentinel_found,
            raw_row_count: raw.row_count(),
            raw_columns: raw.columns,
        },
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn banner_grid() -> SheetGrid {
        SheetGrid::from_rows(
            "Hoja1",
            vec![
                row(&["EMPRESA SAS", "", "", ""]),
                row(&["Ventas marzo", "", "", ""]),
                row(&["", "", "", ""]),
                row(&["Comprobante", "Suc", "Extra", "Total"]),
                row(&["FV-1", "01", "a", "100"]),
                row(&["FV-2", "01", "b", "200"]),
                row(&["", "", "", "999"]),
                row(&["FV-3", "02", "c", "300"]),
                row(&["FV-4", "02", "d", "400"]),
                row(&["  ", "", "", "1000"]),
            ],
        )
    }

    #[test]
    fn test_normalize_grid_end_to_end() {
        let mut profile = ReportProfile::default();
        profile.columns =
            crate::profile::ReferenceColumns::new(["Comprobante", "Total", "Suc"]).unwrap();

        let outcome = normalize_grid(&banner_grid(), &profile);

        assert_eq!(outcome.info.header_row.get(), 4);
        assert!(outcome.info.sentinel_found);
        assert_eq!(outcome.info.raw_row_count, 4);
        assert_eq!(outcome.table.columns(), row(&["Comprobante", "Total", "Suc"]).as_slice());
        assert_eq!(
            outcome.table.rows().iter().map(|r| r[0].as_str()).collect::<Vec<_>>(),
            vec!["FV-1", "FV-2", "FV-3", "FV-4"]
        );
        assert_eq!(outcome.report.dropped, row(&["Extra"]));
    }

    #[test]
    fn test_fallback_header_reported() {
        let grid = SheetGrid::from_rows(
            "Hoja1",
            vec![row(&["Suc", "Total"]), row(&["01", "5"])],
        );
        let outcome = normalize_grid(&grid, &ReportProfile::default());

        assert_eq!(outcome.info.header_row, HeaderRow::FIRST);
        assert!(!outcome.info.sentinel_found);
        assert_eq!(outcome.table.columns(), row(&["Total", "Suc"]).as_slice());
    }

    #[test]
    fn test_import_unsupported_extension() {
        let result = import(Path::new("ventas.txt"), &ReportProfile::default());
        assert!(matches!(result, Err(crate::error::ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_import_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ventas.csv");
        std::fs::write(
            &path,
            "Reporte;;\nComprobante;Total;Base exenta\nFV-1;100;0\n;;\nFV-2;200;0\n",
        )
        .unwrap();

        let table = import(&path, &ReportProfile::default()).unwrap();
        assert_eq!(table.columns(), row(&["Comprobante", "Total"]).as_slice());
        assert_eq!(table.row_count(), 2);
    }
}
