//! End-to-end comparisons over in-memory inputs.

use serial_core::{CompareRequest, ReconEngine, compare, normalize};
use serial_match::{NoProgress, ProgressCounter};
use serial_model::{
    ClassificationThresholds, ColumnSelection, DetectionMethod, MatchStatus, ReconError,
    ReconOptions, RunStatus, Side, SimilarityMetric, SourceInput, TabularSource,
};

struct Table {
    names: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(names: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }
}

impl TabularSource for Table {
    fn column_names(&self) -> &[String] {
        &self.names
    }

    fn column_values(&self, index: usize) -> Vec<Option<&str>> {
        if index >= self.names.len() {
            return Vec::new();
        }
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str).filter(|c| !c.is_empty()))
            .collect()
    }
}

fn lines(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn single_character_typo() {
    let reference = lines(&["B72AE6F13C"]);
    let measured = lines(&["B72AE6F13D"]);
    let request = CompareRequest::new(SourceInput::Lines(&reference), SourceInput::Lines(&measured));
    let comparison = compare(&request, &ReconOptions::default(), &NoProgress).expect("compare");

    let detail = &comparison.result.missing_details[0];
    assert_eq!(detail.status, MatchStatus::PotentialMatch);
    assert!((detail.similarity - 90.0).abs() < 1e-9);
    assert_eq!(detail.diff_pattern(), "✓✓✓✓✓✓✓✓✓✗");
    assert_eq!(comparison.result.status(), RunStatus::Alert);
}

#[test]
fn comma_suffix_is_dropped() {
    assert_eq!(normalize("A1234567BC,EXTRA").as_str(), "A1234567BC");
}

#[test]
fn detection_prefers_serial_column_over_date_and_result() {
    let reference = Table::new(
        &["Date", "TesterResult", "Serial Number"],
        &[
            &["2024-01-01", "PASS", "B72AE6F13C"],
            &["2024-01-02", "FAIL", "A1234567BC"],
        ],
    );
    let measured = Table::new(
        &["Probe", "Slider"],
        &[&["P1", "b72ae6f13c"], &["P2", "A1234567BC"]],
    );
    let request = CompareRequest::new(SourceInput::Table(&reference), SourceInput::Table(&measured));
    let comparison = compare(&request, &ReconOptions::default(), &NoProgress).expect("compare");

    let reference_column = comparison.column(Side::Reference).expect("reference column");
    assert_eq!(reference_column.name, "Serial Number");
    assert_eq!(reference_column.index, 2);
    assert_eq!(comparison.column(Side::Measured).map(|c| c.index), Some(1));
    assert!(comparison.result.is_complete_match());
    assert_eq!(comparison.result.status(), RunStatus::Ok);
}

#[test]
fn fixed_columns_reproduce_positional_layout() {
    let reference = Table::new(&["Master", "Notes"], &[&["SYC12281P0", "x"]]);
    let measured = Table::new(&["Time", "Value"], &[&["12:00", "SYC12281P0"]]);
    let reference_column = ColumnSelection::Index(0);
    let measured_column = ColumnSelection::Index(1);
    let request = CompareRequest::new(SourceInput::Table(&reference), SourceInput::Table(&measured))
        .with_reference_column(&reference_column)
        .with_measured_column(&measured_column);

    let comparison = compare(&request, &ReconOptions::default(), &NoProgress).expect("compare");
    assert_eq!(comparison.result.matched_count, 1);
    assert_eq!(
        comparison.column(Side::Measured).map(|c| c.method),
        Some(DetectionMethod::Explicit)
    );
}

#[test]
fn out_of_range_column_is_rejected() {
    let reference = Table::new(&["Serial"], &[&["SYC12281P0"]]);
    let measured = lines(&["SYC12281P0"]);
    let selection = ColumnSelection::Index(4);
    let request = CompareRequest::new(SourceInput::Table(&reference), SourceInput::Lines(&measured))
        .with_reference_column(&selection);
    let err = compare(&request, &ReconOptions::default(), &NoProgress).unwrap_err();
    assert!(matches!(err, ReconError::ColumnIndexOutOfRange { index: 4, .. }));
}

#[test]
fn invalid_thresholds_are_rejected() {
    let options = ReconOptions::default().with_thresholds(ClassificationThresholds {
        candidate_cutoff: 0.9,
        potential_match: 0.5,
    });
    assert!(matches!(
        ReconEngine::new(&options),
        Err(ReconError::InvalidOption { .. })
    ));
}

#[test]
fn breakdown_and_progress_cover_both_sides() {
    let reference = lines(&["B72AE6F13C", "ABCDEF0000", "SYC12281P0", "A1234567BC"]);
    let measured = lines(&["B72AE6F13D", "ABCDEF9999", "A1234567BC", "ZZZZZZZZZZ"]);
    let request = CompareRequest::new(SourceInput::Lines(&reference), SourceInput::Lines(&measured));
    let counter = ProgressCounter::new();
    let options = ReconOptions::default().with_parallel(true);
    let comparison = compare(&request, &options, &counter).expect("compare");
    let result = &comparison.result;

    assert_eq!(result.reference_total, 4);
    assert_eq!(result.matched_count, 1);
    assert_eq!(result.match_percentage, 25.0);

    let breakdown = result.breakdown(Side::Reference);
    assert_eq!(breakdown.potential_typos, 1);
    assert_eq!(breakdown.needs_review, 1);
    assert_eq!(breakdown.not_found, 1);

    assert_eq!(counter.total(), result.missing_count + result.extra_count);
    assert_eq!(counter.processed(), counter.total());
}

#[test]
fn indel_metric_scores_typo() {
    let reference = lines(&["B72AE6F13C"]);
    let measured = lines(&["B72AE6F13D"]);
    let request = CompareRequest::new(SourceInput::Lines(&reference), SourceInput::Lines(&measured));
    let options = ReconOptions::default().with_metric(SimilarityMetric::Indel);
    let comparison = compare(&request, &options, &NoProgress).expect("compare");
    assert_eq!(
        comparison.result.missing_details[0].status,
        MatchStatus::PotentialMatch
    );
}
