//! Serial source readers.
//!
//! Decodes the files fed to a comparison run:
//!
//! - **CSV** (`.csv`): a table whose first non-empty row is the header.
//! - **Spreadsheet** (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`): the first
//!   worksheet, read the same way as a CSV table.
//! - **Text** (`.txt`, `.lst`): one raw serial per line.
//!
//! CSV and text files must be UTF-8 (a BOM is accepted).

mod checks;
mod csv_table;
mod error;
mod source;
mod spreadsheet;
mod text;

// === Error Types ===
pub use error::{IngestError, Result};

// === Checks ===
pub use checks::{MAX_SOURCE_FILE_SIZE, check_file_size, check_file_size_with_limit, read_utf8};

// === Readers ===
pub use csv_table::{CsvTable, read_csv_table};
pub use source::{LoadedSource, SourceFormat, read_source, read_source_with_limit};
pub use spreadsheet::{SpreadsheetTable, read_spreadsheet_table};
pub use text::{TextLines, read_text_lines};
