//! Typed cell values for the exported sheet.
//!
//! Table cells are display strings. Cells in numeric or date columns are
//! written as real numbers/dates when their text parses, so the sheet's
//! number formats apply; anything else stays text.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<sign>-)?\$?\s*(?P<int>\d{1,3}(?:,\d{3})+|\d+)(?P<frac>\.\d+)?$")
        .expect("number pattern is valid")
});

const DATETIME_FORMATS: [&str; 3] = ["%d/%m/%Y %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

/// Years a worksheet date cell can hold.
const WORKSHEET_YEARS: std::ops::RangeInclusive<i32> = 1900..=9999;

/// How a column's cells are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Date,
}

/// A cell ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue<'a> {
    Blank,
    Text(&'a str),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl<'a> CellValue<'a> {
    pub fn classify(text: &'a str, kind: ColumnKind) -> Self {
        if text.is_empty() {
            return CellValue::Blank;
        }
        let parsed = match kind {
            ColumnKind::Text => None,
            ColumnKind::Number => parse_number(text).map(CellValue::Number),
            ColumnKind::Date => parse_date(text)
                .filter(|dt| WORKSHEET_YEARS.contains(&dt.year()))
                .map(CellValue::DateTime),
        };
        parsed.unwrap_or(CellValue::Text(text))
    }
}

/// Parse `1500000`, `-19.5`, `1,500,000.25` or `$ 1,500`.
///
/// `.` is the decimal separator; `,` is only accepted in thousands groups.
pub fn parse_number(text: &str) -> Option<f64> {
    let caps = NUMBER.captures(text.trim())?;
    let sign = caps.name("sign").map_or("", |m| m.as_str());
    let int = caps.name("int")?.as_str().replace(',', "");
    let frac = caps.name("frac").map_or("", |m| m.as_str());
    format!("{}{}{}", sign, int, frac).parse().ok()
}

/// Parse `dd/mm/yyyy` (as the reader renders dates) or ISO dates, with an
/// optional time part.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1500000"), Some(1500000.0));
        assert_eq!(parse_number("-19.5"), Some(-19.5));
        assert_eq!(parse_number("1,500,000.25"), Some(1500000.25));
        assert_eq!(parse_number("$ 1,500"), Some(1500.0));
        assert_eq!(parse_number(" 42 "), Some(42.0));
    }

    #[test]
    fn test_parse_number_rejects_text() {
        for bad in ["", "abc", "1,5", "12,34,567", "1.2.3", "FV-1", "1e5"] {
            assert_eq!(parse_number(bad), None, "{bad}");
        }
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_date("15/03/2024"), Some(expected));
        assert_eq!(parse_date("2024-03-15"), Some(expected));

        let with_time = parse_date("15/03/2024 08:30:00").unwrap();
        assert_eq!(with_time.format("%H:%M").to_string(), "08:30");

        assert_eq!(parse_date("31/02/2024"), None);
        assert_eq!(parse_date("marzo"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(CellValue::classify("", ColumnKind::Number), CellValue::Blank);
        assert_eq!(CellValue::classify("100", ColumnKind::Text), CellValue::Text("100"));
        assert_eq!(CellValue::classify("100", ColumnKind::Number), CellValue::Number(100.0));
        assert_eq!(CellValue::classify("n/a", ColumnKind::Number), CellValue::Text("n/a"));
        assert!(matches!(
            CellValue::classify("01/02/2024", ColumnKind::Date),
            CellValue::DateTime(_)
        ));
    }

    #[test]
    fn test_dates_outside_worksheet_range_stay_text() {
        assert_eq!(
            CellValue::classify("15/06/1850", ColumnKind::Date),
            CellValue::Text("15/06/1850")
        );
        assert_eq!(
            CellValue::classify("0226-03-15", ColumnKind::Date),
            CellValue::Text("0226-03-15")
        );
        assert!(matches!(
            CellValue::classify("01/01/1900", ColumnKind::Date),
            CellValue::DateTime(_)
        ));
    }
}
