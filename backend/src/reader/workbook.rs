//! Workbook input (`.xlsx`, `.xlsm`, `.xls`) through calamine.
//!
//! Only the first worksheet is read. Cell values become the text a spreadsheet
//! would show for them, see [`display_text`].

use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use chrono::{NaiveDateTime, Timelike};
use std::path::Path;

use crate::error::{ImportError, ImportResult};
use crate::models::SheetGrid;

/// Read the first worksheet of a workbook.
pub fn read_workbook(path: &Path) -> ImportResult<SheetGrid> {
    // Surface a plain I/O error for missing or unreadable files.
    std::fs::metadata(path)?;

    let mut workbook = open_workbook_auto(path)?;
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::NoWorksheet)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoWorksheet)??;

    grid_from_range(&name, &range)
}

/// Copy a used range into a grid anchored at A1.
///
/// Rows and columns before the used range are kept as empty cells so grid
/// coordinates match worksheet coordinates.
pub fn grid_from_range(name: &str, range: &Range<Data>) -> ImportResult<SheetGrid> {
    let (end_row, end_col) = match range.end() {
        Some(end) if !range.is_empty() => end,
        _ => return Err(ImportError::EmptyWorksheet(name.to_string())),
    };

    let rows = (0..=end_row)
        .map(|row| {
            (0..=end_col)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map(display_text)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    Ok(SheetGrid::from_rows(name, rows))
}

/// Text a spreadsheet shows for a cell value.
pub fn display_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => format_excel_datetime(dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Number text as the General format shows it: 15 significant digits,
/// integral values without a decimal point.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let shown: f64 = format!("{:.14e}", value).parse().unwrap_or(value);
    if shown.fract() == 0.0 && shown.abs() < 1e15 {
        format!("{}", shown as i64)
    } else {
        format!("{}", shown)
    }
}

fn format_excel_datetime(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return format_number(dt.as_f64());
    }
    match dt.as_datetime() {
        Some(datetime) => format_datetime(&datetime),
        None => format_number(dt.as_f64()),
    }
}

/// `dd/mm/yyyy`, with the time appended only when it is not midnight.
pub fn format_datetime(datetime: &NaiveDateTime) -> String {
    if datetime.num_seconds_from_midnight() == 0 {
        datetime.format("%d/%m/%Y").to_string()
    } else {
        datetime.format("%d/%m/%Y %H:%M:%S").to_string()
    }
}
