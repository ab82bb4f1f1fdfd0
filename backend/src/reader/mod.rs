//! Spreadsheet reader: turns the first worksheet of a file into a [`SheetGrid`].
//!
//! - [`workbook`] - `.xlsx` / `.xlsm` / `.xls` via calamine
//! - [`delimited`] - `.csv` with encoding and delimiter auto-detection
//!
//! The file handle lives only inside the read call and is closed on every path.

pub mod delimited;
pub mod workbook;

use std::path::Path;

use crate::error::{ImportError, ImportResult};
use crate::models::SheetGrid;

/// Supported input formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    /// Detect the format from the extension (case-insensitive).
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

/// Read the first worksheet of `path` as display strings.
pub fn read_first_sheet(path: &Path) -> ImportResult<SheetGrid> {
    match SourceFormat::from_path(path)? {
        SourceFormat::Workbook => workbook::read_workbook(path),
        SourceFormat::Csv => delimited::read_csv_file(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a.xlsx")).unwrap(), SourceFormat::Workbook);
        assert_eq!(SourceFormat::from_path(Path::new("a.XLS")).unwrap(), SourceFormat::Workbook);
        assert_eq!(SourceFormat::from_path(Path::new("a.xlsm")).unwrap(), SourceFormat::Workbook);
        assert_eq!(SourceFormat::from_path(Path::new("dir/a.csv")).unwrap(), SourceFormat::Csv);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = SourceFormat::from_path(Path::new("report.pdf")).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ref e) if e == "pdf"));
        assert!(SourceFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_missing_file_is_import_error() {
        let result = read_first_sheet(Path::new("/nonexistent/dir/ventas.xlsx"));
        assert!(result.is_err());
    }
}
