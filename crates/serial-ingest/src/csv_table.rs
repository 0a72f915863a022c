use std::path::Path;

use csv::ReaderBuilder;
use serial_model::TabularSource;
use tracing::debug;

use crate::checks::read_utf8;
use crate::error::{IngestError, Result};

/// A decoded CSV file: the first non-empty row is the header.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

pub(crate) fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.is_empty())
}

/// Splits non-blank rows into named headers and body rows.
///
/// The table is as wide as its widest row; unnamed columns become
/// `column_N` (1-based). `None` when there are no rows.
pub(crate) fn split_header(raw_rows: Vec<Vec<String>>) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    let mut rows = raw_rows.into_iter();
    let header_row = rows.next()?;
    let rows: Vec<Vec<String>> = rows.collect();
    let width = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header_row.len()))
        .max()
        .unwrap_or_default();
    let headers = (0..width)
        .map(|index| {
            let name = header_row
                .get(index)
                .map(|cell| normalize_header(cell))
                .unwrap_or_default();
            if name.is_empty() {
                format!("column_{}", index + 1)
            } else {
                name
            }
        })
        .collect();
    Some((headers, rows))
}

/// Non-empty cells of one column, one entry per row.
pub(crate) fn column_cells<'a>(
    headers: &[String],
    rows: &'a [Vec<String>],
    index: usize,
) -> Vec<Option<&'a str>> {
    if index >= headers.len() {
        return Vec::new();
    }
    rows.iter()
        .map(|row| {
            row.get(index)
                .map(String::as_str)
                .filter(|cell| !cell.is_empty())
        })
        .collect()
}

impl CsvTable {
    /// Parses CSV text. Row widths may vary; short rows read as null cells.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut raw_rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| IngestError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            let row: Vec<String> = record.iter().map(normalize_cell).collect();
            if !is_blank_row(&row) {
                raw_rows.push(row);
            }
        }

        let Some((headers, rows)) = split_header(raw_rows) else {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        };

        debug!(
            path = %path.display(),
            columns = headers.len(),
            rows = rows.len(),
            "parsed CSV table"
        );
        Ok(Self { headers, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl TabularSource for CsvTable {
    fn column_names(&self) -> &[String] {
        &self.headers
    }

    fn column_values(&self, index: usize) -> Vec<Option<&str>> {
        column_cells(&self.headers, &self.rows, index)
    }
}

/// Reads a CSV file as UTF-8, dropping a leading BOM.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let text = read_utf8(path)?;
    CsvTable::parse(path, &text)
}
