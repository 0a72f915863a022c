use std::path::Path;

use serial_model::SourceInput;
use tracing::info;

use crate::checks::{MAX_SOURCE_FILE_SIZE, check_file_size_with_limit};
use crate::csv_table::{CsvTable, read_csv_table};
use crate::error::{IngestError, Result};
use crate::spreadsheet::{SpreadsheetTable, read_spreadsheet_table};
use crate::text::{TextLines, read_text_lines};

/// Source formats recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
    Text,
}

impl SourceFormat {
    /// Format for a path, or `UnsupportedFormat`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Spreadsheet),
            "txt" | "lst" => Ok(Self::Text),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// A decoded source file.
#[derive(Debug, Clone)]
pub enum LoadedSource {
    Table(CsvTable),
    Sheet(SpreadsheetTable),
    Lines(TextLines),
}

impl LoadedSource {
    pub fn format(&self) -> SourceFormat {
        match self {
            Self::Table(_) => SourceFormat::Csv,
            Self::Sheet(_) => SourceFormat::Spreadsheet,
            Self::Lines(_) => SourceFormat::Text,
        }
    }

    /// Borrowed view for the comparison engine.
    pub fn as_input(&self) -> SourceInput<'_> {
        match self {
            Self::Table(table) => SourceInput::Table(table),
            Self::Sheet(sheet) => SourceInput::Table(sheet),
            Self::Lines(lines) => SourceInput::Lines(lines.as_slice()),
        }
    }
}

/// Reads a source file with the default size limit.
pub fn read_source(path: &Path) -> Result<LoadedSource> {
    read_source_with_limit(path, MAX_SOURCE_FILE_SIZE)
}

/// Reads a source file, dispatching on its extension.
pub fn read_source_with_limit(path: &Path, max_size: u64) -> Result<LoadedSource> {
    let format = SourceFormat::from_path(path)?;
    check_file_size_with_limit(path, max_size)?;
    let source = match format {
        SourceFormat::Csv => LoadedSource::Table(read_csv_table(path)?),
        SourceFormat::Spreadsheet => LoadedSource::Sheet(read_spreadsheet_table(path)?),
        SourceFormat::Text => LoadedSource::Lines(read_text_lines(path)?),
    };
    info!(path = %path.display(), format = ?format, "source loaded");
    Ok(source)
}
