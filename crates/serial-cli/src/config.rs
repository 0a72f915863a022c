//! Run configuration: TOML file plus command-line overrides.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serial_model::{ColumnSelection, ReconOptions, SimilarityMetric};
use tracing::{debug, info};

/// Column selection for both inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub reference: ColumnSelection,
    pub measured: ColumnSelection,
}

/// Everything a `compare` run can be configured with.
///
/// ```toml
/// [columns]
/// reference = { index = 0 }
/// measured = { name = "Slider SN" }
///
/// [classification.thresholds]
/// potential_match = 0.85
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub columns: ColumnConfig,
    #[serde(flatten)]
    pub options: ReconOptions,
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub reference_column: Option<ColumnSelection>,
    pub measured_column: Option<ColumnSelection>,
    pub candidate_cutoff: Option<f64>,
    pub potential_match: Option<f64>,
    pub metric: Option<SimilarityMetric>,
    pub parallel: bool,
}

impl RunConfig {
    /// Parses a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse run configuration")
    }

    /// Loads a configuration file, or the defaults without one.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("no configuration file, using defaults");
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read configuration {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("load configuration {}", path.display()))?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Applies command-line overrides and validates the result.
    pub fn apply(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(selection) = overrides.reference_column {
            self.columns.reference = selection;
        }
        if let Some(selection) = overrides.measured_column {
            self.columns.measured = selection;
        }
        let thresholds = &mut self.options.classification.thresholds;
        if let Some(cutoff) = overrides.candidate_cutoff {
            thresholds.candidate_cutoff = cutoff;
        }
        if let Some(cutoff) = overrides.potential_match {
            thresholds.potential_match = cutoff;
        }
        if let Some(metric) = overrides.metric {
            self.options.classification.metric = metric;
        }
        if overrides.parallel {
            self.options.classification.parallel = true;
        }
        self.options
            .validate()
            .context("invalid reconciliation options")?;
        Ok(self)
    }

    /// The configuration rendered as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize run configuration")
    }
}

/// Parses a `--*-column` value: a 0-based index, or a column name.
pub fn parse_column_selection(raw: &str) -> Result<ColumnSelection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("column must be an index or a name");
    }
    if trimmed.eq_ignore_ascii_case("auto") {
        return Ok(ColumnSelection::Auto);
    }
    Ok(match trimmed.parse::<usize>() {
        Ok(index) => ColumnSelection::Index(index),
        Err(_) => ColumnSelection::Name(trimmed.to_string()),
    })
}
