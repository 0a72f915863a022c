use thiserror::Error;

use crate::result::Side;

/// Errors raised for caller-supplied configuration.
///
/// Reconciliation itself is total; these only surface when options or an
/// explicit column selection cannot be honoured.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("invalid option {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },

    #[error("invalid serial pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("{side} column index {index} is out of range ({columns} columns)")]
    ColumnIndexOutOfRange {
        side: Side,
        index: usize,
        columns: usize,
    },

    #[error("{side} column '{name}' not found")]
    ColumnNotFound { side: Side, name: String },
}

impl ReconError {
    pub(crate) fn invalid_option(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReconError>;
