use std::fmt;

use serde::Serialize;

use crate::result::Side;

/// Non-fatal diagnostics raised during a comparison run.
///
/// These usually point at a parsing or column problem upstream and should be
/// shown to the user rather than silently trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReconWarning {
    /// No column qualified by name or by content; the first column was used.
    LowConfidenceColumn {
        side: Side,
        index: usize,
        name: String,
    },
    /// A collection had no serials after normalization.
    EmptyCollection { side: Side },
    /// A source table had no columns at all.
    NoColumns { side: Side },
}

impl ReconWarning {
    pub fn side(&self) -> Side {
        match self {
            Self::LowConfidenceColumn { side, .. }
            | Self::EmptyCollection { side }
            | Self::NoColumns { side } => *side,
        }
    }
}

impl fmt::Display for ReconWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowConfidenceColumn { side, index, name } => write!(
                f,
                "{side}: no serial column detected, using column {index} ('{name}'); check the result"
            ),
            Self::EmptyCollection { side } => {
                write!(f, "{side}: no serials found after normalization")
            }
            Self::NoColumns { side } => write!(f, "{side}: table has no columns"),
        }
    }
}
