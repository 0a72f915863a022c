//! Decoded inputs handed to the core by a tabular reader.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A decoded table: ordered column names plus per-column raw values.
pub trait TabularSource {
    /// Column names in their natural order.
    fn column_names(&self) -> &[String];

    /// Raw values of one column, top to bottom. `None` marks a null cell.
    ///
    /// An out-of-range index yields an empty vector.
    fn column_values(&self, index: usize) -> Vec<Option<&str>>;

    fn column_count(&self) -> usize {
        self.column_names().len()
    }
}

/// One side of a comparison, as handed over by the reader.
#[derive(Clone, Copy)]
pub enum SourceInput<'a> {
    /// Tabular data; the serial column is detected or selected.
    Table(&'a dyn TabularSource),
    /// Line-oriented data; every line is a raw serial.
    Lines(&'a [String]),
}

impl fmt::Debug for SourceInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(table) => f
                .debug_tuple("Table")
                .field(&table.column_names())
                .finish(),
            Self::Lines(lines) => f.debug_tuple("Lines").field(&lines.len()).finish(),
        }
    }
}

/// How the serial column of a table is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSelection {
    /// Run the detection strategies.
    #[default]
    Auto,
    /// Use a fixed 0-based column index.
    Index(usize),
    /// Use the column whose trimmed name matches, ignoring case.
    Name(String),
}

/// Which rule picked a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Chosen by the caller.
    Explicit,
    /// Column name contained an inclusion keyword.
    NameKeyword,
    /// Enough sampled values looked like serials.
    ValuePattern,
    /// Nothing qualified; first column used.
    Fallback,
}

impl DetectionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::NameKeyword => "name keyword",
            Self::ValuePattern => "value pattern",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The column picked for a tabular source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDetection {
    pub index: usize,
    pub name: String,
    pub method: DetectionMethod,
    /// Fraction of sampled values matching the serial pattern (pattern pass only).
    pub match_rate: Option<f64>,
}

impl ColumnDetection {
    /// False when detection fell back to the first column.
    pub fn is_reliable(&self) -> bool {
        self.method != DetectionMethod::Fallback
    }
}
