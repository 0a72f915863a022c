use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use serial_model::TabularSource;
use tracing::debug;

use crate::csv_table::{column_cells, is_blank_row, normalize_cell, split_header};
use crate::error::{IngestError, Result};

/// The first worksheet of a workbook, read like a CSV table.
#[derive(Debug, Clone)]
pub struct SpreadsheetTable {
    /// Name of the worksheet the cells came from.
    pub sheet: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SpreadsheetTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl TabularSource for SpreadsheetTable {
    fn column_names(&self) -> &[String] {
        &self.headers
    }

    fn column_values(&self, index: usize) -> Vec<Option<&str>> {
        column_cells(&self.headers, &self.rows, index)
    }
}

/// Stringified cell; error cells read as empty.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(text) => normalize_cell(text),
        // Whole numbers come back as floats; keep them free of a `.0` suffix.
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        other => normalize_cell(&other.to_string()),
    }
}

/// Reads the first worksheet of an `xlsx`/`xlsm`/`xlsb`/`xls`/`ods` workbook.
pub fn read_spreadsheet_table(path: &Path) -> Result<SpreadsheetTable> {
    let spreadsheet_error = |message: String| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook =
        open_workbook_auto(path).map_err(|err| spreadsheet_error(err.to_string()))?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Err(IngestError::EmptySpreadsheet {
            path: path.to_path_buf(),
        });
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|err| spreadsheet_error(format!("sheet '{sheet}': {err}")))?;

    let raw_rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|row| !is_blank_row(row))
        .collect();
    let Some((headers, rows)) = split_header(raw_rows) else {
        return Err(IngestError::EmptySpreadsheet {
            path: path.to_path_buf(),
        });
    };

    debug!(
        path = %path.display(),
        sheet = %sheet,
        columns = headers.len(),
        rows = rows.len(),
        "parsed spreadsheet"
    );
    Ok(SpreadsheetTable {
        sheet,
        headers,
        rows,
    })
}
