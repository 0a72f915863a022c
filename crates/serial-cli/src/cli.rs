//! CLI argument definitions for `serial-recon`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use serial_cli::config::parse_column_selection;
use serial_cli::report::DEFAULT_DETAIL_LIMIT;
use serial_model::{ColumnSelection, SimilarityMetric};

#[derive(Parser)]
#[command(
    name = "serial-recon",
    version,
    about = "Reconcile a reference serial list against a measured one",
    long_about = "Compare a reference (master) serial list with a measured list.\n\n\
                  Reports missing and extra serials and flags near matches that are\n\
                  likely transcription typos. Reads CSV and plain text files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "compact",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two serial lists.
    Compare(CompareArgs),

    /// Print the effective configuration as TOML.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Reference (master) list: .csv, .xlsx, .xls, .ods, .txt or .lst.
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Measured list: .csv, .xlsx, .xls, .ods, .txt or .lst.
    #[arg(value_name = "MEASURED")]
    pub measured: PathBuf,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Serial column of a reference table: 0-based index, name, or "auto".
    #[arg(long = "reference-column", value_name = "COLUMN", value_parser = parse_column_selection)]
    pub reference_column: Option<ColumnSelection>,

    /// Serial column of a measured table: 0-based index, name, or "auto".
    #[arg(long = "measured-column", value_name = "COLUMN", value_parser = parse_column_selection)]
    pub measured_column: Option<ColumnSelection>,

    /// Minimum similarity (0-1) for a candidate to be reported.
    #[arg(long = "candidate-cutoff", value_name = "RATIO")]
    pub candidate_cutoff: Option<f64>,

    /// Minimum similarity (0-1) for a potential typo.
    #[arg(long = "potential-match", value_name = "RATIO")]
    pub potential_match: Option<f64>,

    /// Similarity metric.
    #[arg(long = "metric", value_enum)]
    pub metric: Option<MetricArg>,

    /// Classify unmatched serials on all cores.
    #[arg(long = "parallel")]
    pub parallel: bool,

    /// Detail rows shown per side.
    #[arg(long = "limit", value_name = "N", default_value_t = DEFAULT_DETAIL_LIMIT)]
    pub limit: usize,

    /// Write result.json, missing.txt and extra.txt into this directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Exit with status 2 when reference serials are missing.
    #[arg(long = "fail-on-missing")]
    pub fail_on_missing: bool,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Configuration file to merge over the defaults.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// CLI similarity metric choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum MetricArg {
    MatchingBlocks,
    Indel,
}

impl From<MetricArg> for SimilarityMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::MatchingBlocks => Self::MatchingBlocks,
            MetricArg::Indel => Self::Indel,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
