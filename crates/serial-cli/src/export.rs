//! Writing a comparison to an output directory.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serial_core::Comparison;
use serial_model::{RunStatus, SerialKey, Side, TypoBreakdown};
use tracing::info;

pub const RESULT_FILE: &str = "result.json";
pub const MISSING_FILE: &str = "missing.txt";
pub const EXTRA_FILE: &str = "extra.txt";

/// Top-level document written to `result.json`.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    /// RFC 3339, UTC.
    pub generated_at: String,
    pub reference_path: &'a Path,
    pub measured_path: &'a Path,
    pub status: RunStatus,
    pub missing_breakdown: TypoBreakdown,
    pub extra_breakdown: TypoBreakdown,
    #[serde(flatten)]
    pub comparison: &'a Comparison,
}

/// Files produced by [`write_exports`].
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub result: PathBuf,
    pub missing: PathBuf,
    pub extra: PathBuf,
}

/// Writes `result.json`, `missing.txt` and `extra.txt` into `dir`.
pub fn write_exports(
    dir: &Path,
    comparison: &Comparison,
    reference_path: &Path,
    measured_path: &Path,
) -> Result<ExportPaths> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let result = &comparison.result;
    let document = ExportDocument {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        reference_path,
        measured_path,
        status: result.status(),
        missing_breakdown: result.breakdown(Side::Reference),
        extra_breakdown: result.breakdown(Side::Measured),
        comparison,
    };

    let paths = ExportPaths {
        result: dir.join(RESULT_FILE),
        missing: dir.join(MISSING_FILE),
        extra: dir.join(EXTRA_FILE),
    };
    write_json(&paths.result, &document)?;
    write_serials(&paths.missing, &result.missing)?;
    write_serials(&paths.extra, &result.extra)?;
    info!(dir = %dir.display(), "exports written");
    Ok(paths)
}

fn write_json(path: &Path, document: &ExportDocument<'_>) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)
        .with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))
}

fn write_serials(path: &Path, serials: &[SerialKey]) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for serial in serials {
        writeln!(writer, "{serial}").with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))
}
