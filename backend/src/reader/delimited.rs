//! CSV input with encoding and delimiter auto-detection.
//!
//! Cells are kept as raw text: no trimming and no type coercion, the same way
//! workbook cells are read as their display text.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::path::Path;

use crate::error::ImportResult;
use crate::models::SheetGrid;

/// Candidate field separators, in tie-break order.
const SEPARATORS: [u8; 4] = [b';', b',', b'\t', b'|'];

/// Non-empty lines sampled when choosing the separator.
const SAMPLE_LINES: usize = 20;

/// Pick the text encoding of a CSV file.
///
/// Valid UTF-8 always wins: chardet tends to guess a Latin code page for
/// short files whose only non-ASCII text is one accented header. Otherwise
/// chardet's guess is mapped to an `encoding_rs` encoding, with Windows-1252
/// for labels it does not know.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }
    let (charset, _confidence, _language) = chardet::detect(bytes);
    Encoding::for_label(charset.as_bytes()).unwrap_or(WINDOWS_1252)
}

/// Decode bytes, dropping a leading byte order mark.
///
/// A BOM would otherwise stick to the first header cell and break the
/// sentinel match.
pub fn decode_content(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, _) = encoding.decode(bytes);
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text.into_owned(),
    }
}

/// Choose the field separator from the first non-empty lines.
///
/// Banner lines above the header usually hold no separator at all, so the
/// separator present on the most sampled lines wins, then the one with the
/// most occurrences. Text without any candidate falls back to `;`.
pub fn detect_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    SEPARATORS
        .iter()
        .enumerate()
        .map(|(rank, &sep)| {
            let per_line = sample.iter().map(|line| line.bytes().filter(|&b| b == sep).count());
            let lines_with = per_line.clone().filter(|&n| n > 0).count();
            let total: usize = per_line.sum();
            // Earlier separators win ties.
            ((lines_with, total, std::cmp::Reverse(rank)), sep)
        })
        .filter(|((lines_with, _, _), _)| *lines_with > 0)
        .max_by_key(|(score, _)| *score)
        .map_or(b';', |(_, sep)| sep)
}

/// Parse decoded CSV text into a grid.
pub fn parse_grid(name: &str, content: &str, delimiter: u8) -> ImportResult<SheetGrid> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(SheetGrid::from_rows(name, rows))
}

/// Read a CSV file with auto-detected encoding and delimiter.
pub fn read_csv_file(path: &Path) -> ImportResult<SheetGrid> {
    let bytes = std::fs::read(path)?;
    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, encoding);
    let delimiter = detect_delimiter(&content);

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("csv");

    parse_grid(name, &content, delimiter)
}
