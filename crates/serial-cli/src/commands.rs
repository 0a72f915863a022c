use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use serial_cli::config::{Overrides, RunConfig};
use serial_cli::export::{ExportPaths, write_exports};
use serial_core::{CompareRequest, Comparison, ReconEngine};
use serial_ingest::read_source;
use tracing::{info, info_span};

use crate::cli::{CompareArgs, ConfigArgs};
use crate::progress::BarProgress;

/// A finished `compare` run.
pub struct CompareOutcome {
    pub comparison: Comparison,
    pub exports: Option<ExportPaths>,
}

pub fn run_compare(args: &CompareArgs) -> Result<CompareOutcome> {
    let span = info_span!(
        "compare",
        reference = %args.reference.display(),
        measured = %args.measured.display()
    );
    let _guard = span.enter();

    let config = RunConfig::load(args.config.as_deref())?.apply(overrides(args))?;
    let engine = ReconEngine::new(&config.options).context("prepare reconciliation")?;

    let reference = read_source(&args.reference)
        .with_context(|| format!("read reference {}", args.reference.display()))?;
    let measured = read_source(&args.measured)
        .with_context(|| format!("read measured {}", args.measured.display()))?;

    let request = CompareRequest::new(reference.as_input(), measured.as_input())
        .with_reference_column(&config.columns.reference)
        .with_measured_column(&config.columns.measured);
    let progress = BarProgress::new(!args.no_progress && io::stderr().is_terminal());
    let comparison = engine
        .compare(&request, &progress)
        .context("reconcile serial lists")?;
    info!(
        status = ?comparison.result.status(),
        match_percentage = comparison.result.match_percentage,
        "comparison finished"
    );

    let exports = args
        .output_dir
        .as_deref()
        .map(|dir| write_exports(dir, &comparison, &args.reference, &args.measured))
        .transpose()?;
    Ok(CompareOutcome {
        comparison,
        exports,
    })
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    let config = RunConfig::load(args.config.as_deref())?.apply(Overrides::default())?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn overrides(args: &CompareArgs) -> Overrides {
    Overrides {
        reference_column: args.reference_column.clone(),
        measured_column: args.measured_column.clone(),
        candidate_cutoff: args.candidate_cutoff,
        potential_match: args.potential_match,
        metric: args.metric.map(Into::into),
        parallel: args.parallel,
    }
}
