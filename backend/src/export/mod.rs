//! Formatted workbook export.
//!
//! Layout of the single output sheet:
//!
//! ```text
//! row 1..=banner_rows   merged banner rows (title, organization, identifier)
//! header_row            column names, bold, filled, bottom border
//! header_row + 1 ..     one row per table row
//! ```
//!
//! The header and data rectangle spans the reference width, so a table missing
//! some reference columns still gets a full-width frame. Export is pure
//! presentation: column order is taken from the table as-is.

pub mod cells;
pub mod style;

use chrono::NaiveDate;
use rust_xlsxwriter::{ColNum, ExcelDateTime, Format, RowNum, Workbook, Worksheet};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, ExportResult};
use crate::logs::{log_info, log_success};
use crate::models::NormalizedTable;
use crate::profile::{ExportTemplate, ReportProfile};

use cells::{CellValue, ColumnKind};
use style::SheetStyles;

/// Export `table` to `path` using the profile's template.
///
/// The workbook is written to a temporary file next to `path` and renamed into
/// place once complete; on failure `path` is left untouched.
pub fn export(table: &NormalizedTable, path: &Path, profile: &ReportProfile) -> ExportResult<()> {
    check_extension(path)?;

    log_info(format!(
        "📝 Writing {} rows x {} columns",
        table.row_count(),
        table.column_count()
    ));
    let bytes = export_to_buffer(table, profile)?;
    write_atomic(path, &bytes)?;
    log_success(format!("Exported to {}", path.display()));

    Ok(())
}

/// Render the formatted workbook to bytes.
pub fn export_to_buffer(table: &NormalizedTable, profile: &ReportProfile) -> ExportResult<Vec<u8>> {
    let mut workbook = build_workbook(table, profile)?;
    Ok(workbook.save_to_buffer()?)
}

/// Build the formatted workbook in memory.
pub fn build_workbook(table: &NormalizedTable, profile: &ReportProfile) -> ExportResult<Workbook> {
    let template = &profile.template;
    let styles = SheetStyles::from_template(template)?;
    let width = frame_width(table, profile)?;

    if template.header_row == 0 || template.banner_rows >= template.header_row {
        return Err(ExportError::InvalidTemplate(format!(
            "header row {} must come after {} banner rows",
            template.header_row, template.banner_rows
        )));
    }
    let header_row: RowNum = template.header_row - 1;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(&template.sheet_name)?;

    write_header(sheet, table, header_row, width, &styles)?;
    write_rows(sheet, table, header_row + 1, width, template, &styles)?;

    // Fit widths before the banner exists so the large title does not widen
    // column A.
    sheet.autofit();
    write_banner(sheet, template, width, &styles)?;

    if template.freeze_header {
        sheet.set_freeze_panes(header_row + 1, 0)?;
    }

    Ok(workbook)
}

/// Suggested output path for an export made on `date`.
pub fn default_output_path(dir: &Path, template: &ExportTemplate, date: NaiveDate) -> PathBuf {
    dir.join(template.default_file_name(date))
}

fn check_extension(path: &Path) -> ExportResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if ext == "xlsx" {
        Ok(())
    } else {
        Err(ExportError::UnsupportedFormat(ext))
    }
}

/// Columns covered by the banner, header and border frame.
fn frame_width(table: &NormalizedTable, profile: &ReportProfile) -> ExportResult<ColNum> {
    let width = profile.columns.len().max(table.column_count()).max(1);
    ColNum::try_from(width)
        .map_err(|_| ExportError::InvalidTemplate(format!("{} columns is too wide", width)))
}

fn write_header(
    sheet: &mut Worksheet,
    table: &NormalizedTable,
    row: RowNum,
    width: ColNum,
    styles: &SheetStyles,
) -> ExportResult<()> {
    for col in 0..width {
        match table.columns().get(col as usize) {
            Some(name) if !name.is_empty() => {
                sheet.write_string_with_format(row, col, name, &styles.header)?;
            }
            _ => {
                sheet.write_blank(row, col, &styles.header)?;
            }
        }
    }
    Ok(())
}

fn write_rows(
    sheet: &mut Worksheet,
    table: &NormalizedTable,
    first_row: RowNum,
    width: ColNum,
    template: &ExportTemplate,
    styles: &SheetStyles,
) -> ExportResult<()> {
    let kinds: Vec<ColumnKind> = table
        .columns()
        .iter()
        .map(|name| column_kind(template, name))
        .collect();

    for (offset, cells) in table.rows().iter().enumerate() {
        let row = RowNum::try_from(offset)
            .ok()
            .and_then(|o| first_row.checked_add(o))
            .ok_or_else(|| ExportError::InvalidTemplate("too many rows".into()))?;

        for col in 0..width {
            let idx = col as usize;
            let value = match (cells.get(idx), kinds.get(idx)) {
                (Some(text), Some(&kind)) => CellValue::classify(text, kind),
                _ => CellValue::Blank,
            };
            write_cell(sheet, row, col, value, styles)?;
        }
    }
    Ok(())
}

fn column_kind(template: &ExportTemplate, name: &str) -> ColumnKind {
    if template.is_numeric_column(name) {
        ColumnKind::Number
    } else if template.is_date_column(name) {
        ColumnKind::Date
    } else {
        ColumnKind::Text
    }
}

fn write_cell(
    sheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: CellValue<'_>,
    styles: &SheetStyles,
) -> ExportResult<()> {
    match value {
        CellValue::Blank => {
            sheet.write_blank(row, col, &styles.text)?;
        }
        CellValue::Text(text) => {
            sheet.write_string_with_format(row, col, text, &styles.text)?;
        }
        CellValue::Number(n) => {
            sheet.write_number_with_format(row, col, n, &styles.number)?;
        }
        CellValue::DateTime(dt) => {
            let datetime = to_excel_datetime(&dt)?;
            sheet.write_datetime_with_format(row, col, &datetime, &styles.date)?;
        }
    }
    Ok(())
}

fn to_excel_datetime(dt: &chrono::NaiveDateTime) -> ExportResult<ExcelDateTime> {
    use chrono::{Datelike, Timelike};

    let year = u16::try_from(dt.year())
        .map_err(|_| ExportError::InvalidTemplate(format!("date out of range: {}", dt)))?;
    let date = ExcelDateTime::from_ymd(year, dt.month() as u8, dt.day() as u8)?;
    Ok(date.and_hms(dt.hour() as u16, dt.minute() as u8, dt.second())?)
}

fn write_banner(
    sheet: &mut Worksheet,
    template: &ExportTemplate,
    width: ColNum,
    styles: &SheetStyles,
) -> ExportResult<()> {
    let lines: Vec<(&str, &Format)> = [
        (template.title.as_str(), &styles.banner_title),
        (template.organization.as_str(), &styles.banner_subtitle),
        (template.organization_id.as_str(), &styles.banner_subtitle),
    ]
    .into_iter()
    .filter(|(text, _)| !text.is_empty())
    .collect();

    let rows = template.banner_rows;
    if lines.len() as u32 > rows {
        return Err(ExportError::InvalidTemplate(format!(
            "{} banner lines do not fit in {} rows",
            lines.len(),
            rows
        )));
    }
    // Keep an empty band above and below the text when there is room.
    let first_line: RowNum = if rows >= lines.len() as u32 + 2 { 1 } else { 0 };

    for row in 0..rows {
        let line = row
            .checked_sub(first_line)
            .and_then(|i| lines.get(i as usize))
            .copied();
        let (text, format) = line.unwrap_or(("", &styles.banner));

        if width > 1 {
            sheet.merge_range(row, 0, row, width - 1, text, format)?;
        } else if text.is_empty() {
            sheet.write_blank(row, 0, format)?;
        } else {
            sheet.write_string_with_format(row, 0, text, format)?;
        }
    }
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> ExportResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".colreorder-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Table;
    use crate::transform::reorder_columns;

    fn table(columns: &[&str], rows: &[&[&str]]) -> NormalizedTable {
        let profile = ReportProfile::default();
        let raw = Table::new(
            columns.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        );
        reorder_columns(&raw, &profile.columns)
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let t = table(&["Comprobante", "Total"], &[&["FV-1", "1500000"]]);

        export(&t, &path, &ReportProfile::default()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_export_rejects_non_xlsx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let err = export(&table(&["Total"], &[]), &path, &ReportProfile::default()).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(ref e) if e == "csv"));
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_export_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let mut profile = ReportProfile::default();
        profile.template.banner_fill = "not-a-color".into();

        let result = export(&table(&["Total"], &[&["1"]]), &path, &profile);
        assert!(result.is_err());
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let path = Path::new("/nonexistent/colreorder/out.xlsx");
        let err = export(&table(&["Total"], &[]), path, &ReportProfile::default()).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn test_out_of_range_date_does_not_abort_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let t = table(
            &["Comprobante", "Fecha elaboración", "Total"],
            &[&["FV-1", "15/06/1850", "100"], &["FV-2", "15/03/2026", "200"]],
        );

        export(&t, &path, &ReportProfile::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_zero_column_table_exports() {
        let t = table(&["Extra"], &[&["x"]]);
        assert_eq!(t.column_count(), 0);
        let bytes = export_to_buffer(&t, &ReportProfile::default()).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_single_column_profile_skips_merge() {
        let mut profile = ReportProfile::default();
        profile.columns = crate::profile::ReferenceColumns::new(["Total"]).unwrap();
        let raw = Table::new(vec!["Total".into()], vec![vec!["5".into()]]);
        let t = reorder_columns(&raw, &profile.columns);

        assert!(export_to_buffer(&t, &profile).is_ok());
    }

    #[test]
    fn test_default_output_path() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let path = default_output_path(Path::new("/tmp"), &ExportTemplate::default(), date);
        assert_eq!(
            path,
            Path::new("/tmp/2026-10-18 Libro Oficial de Ventas.xlsx")
        );
    }
}
