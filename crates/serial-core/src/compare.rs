//! One comparison run: collect both sides, reconcile, classify.

use serde::Serialize;
use serial_match::{FuzzyClassifier, ProgressSink};
use serial_model::{
    ColumnDetection, ColumnSelection, ReconOptions, ReconWarning, ReconciliationResult, Result,
    SerialCollection, Side, SourceInput,
};
use tracing::{info, info_span, warn};

use crate::detect::ColumnDetector;
use crate::normalize::Normalizer;
use crate::reconcile::reconcile;

static AUTO: ColumnSelection = ColumnSelection::Auto;

/// Both inputs of a run and how their serial columns are chosen.
#[derive(Debug, Clone, Copy)]
pub struct CompareRequest<'a> {
    pub reference: SourceInput<'a>,
    pub measured: SourceInput<'a>,
    pub reference_column: &'a ColumnSelection,
    pub measured_column: &'a ColumnSelection,
}

impl<'a> CompareRequest<'a> {
    /// A request that auto-detects columns on both sides.
    pub fn new(reference: SourceInput<'a>, measured: SourceInput<'a>) -> Self {
        Self {
            reference,
            measured,
            reference_column: &AUTO,
            measured_column: &AUTO,
        }
    }

    pub fn with_reference_column(mut self, selection: &'a ColumnSelection) -> Self {
        self.reference_column = selection;
        self
    }

    pub fn with_measured_column(mut self, selection: &'a ColumnSelection) -> Self {
        self.measured_column = selection;
        self
    }

    fn input(&self, side: Side) -> (SourceInput<'a>, &'a ColumnSelection) {
        match side {
            Side::Reference => (self.reference, self.reference_column),
            Side::Measured => (self.measured, self.measured_column),
        }
    }
}

/// Everything a report needs from one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub result: ReconciliationResult,
    /// Column used for a tabular reference input.
    pub reference_column: Option<ColumnDetection>,
    /// Column used for a tabular measured input.
    pub measured_column: Option<ColumnDetection>,
    pub warnings: Vec<ReconWarning>,
}

impl Comparison {
    pub fn column(&self, side: Side) -> Option<&ColumnDetection> {
        match side {
            Side::Reference => self.reference_column.as_ref(),
            Side::Measured => self.measured_column.as_ref(),
        }
    }
}

/// A collection built from one input, plus where it came from.
#[derive(Debug, Clone)]
pub struct CollectedSide {
    pub collection: SerialCollection,
    pub column: Option<ColumnDetection>,
}

/// Runs comparisons with one validated set of options.
#[derive(Debug)]
pub struct ReconEngine {
    normalizer: Normalizer,
    detector: ColumnDetector,
    classifier: FuzzyClassifier,
}

impl ReconEngine {
    /// Validates the options and prepares the components.
    ///
    /// # Errors
    ///
    /// Returns an error for inconsistent options or an invalid serial pattern.
    pub fn new(options: &ReconOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            normalizer: Normalizer::new(&options.normalization),
            detector: ColumnDetector::from_options(&options.detection)?,
            classifier: FuzzyClassifier::new(&options.classification),
        })
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn detector(&self) -> &ColumnDetector {
        &self.detector
    }

    pub fn classifier(&self) -> &FuzzyClassifier {
        &self.classifier
    }

    /// Builds the serial collection of one input.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit column selection cannot be honoured.
    pub fn collect(
        &self,
        side: Side,
        input: SourceInput<'_>,
        selection: &ColumnSelection,
        warnings: &mut Vec<ReconWarning>,
    ) -> Result<CollectedSide> {
        let (collection, column) = match input {
            SourceInput::Lines(lines) => (
                self.normalizer
                    .collect(lines.iter().map(|line| Some(line.as_str()))),
                None,
            ),
            SourceInput::Table(table) => {
                match self.detector.select(table, selection, side)? {
                    Some(column) => {
                        if !column.is_reliable() {
                            warnings.push(ReconWarning::LowConfidenceColumn {
                                side,
                                index: column.index,
                                name: column.name.clone(),
                            });
                        }
                        let values = table.column_values(column.index);
                        (self.normalizer.collect(values), Some(column))
                    }
                    None => {
                        warn!(side = %side, "source table has no columns");
                        warnings.push(ReconWarning::NoColumns { side });
                        (SerialCollection::new(), None)
                    }
                }
            }
        };

        let stats = collection.stats();
        info!(
            side = %side,
            serials = collection.len(),
            raw_values = stats.raw_values,
            blank = stats.blank,
            too_short = stats.too_short,
            duplicates = stats.duplicates,
            "collection built"
        );
        if collection.is_empty() {
            warn!(side = %side, "no serials after normalization");
            warnings.push(ReconWarning::EmptyCollection { side });
        }
        Ok(CollectedSide { collection, column })
    }

    /// Runs a full comparison.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit column selection cannot be honoured.
    pub fn compare(
        &self,
        request: &CompareRequest<'_>,
        progress: &dyn ProgressSink,
    ) -> Result<Comparison> {
        let span = info_span!("compare");
        let _guard = span.enter();

        let mut warnings = Vec::new();
        let mut collect_side = |side: Side| {
            let _side_span = info_span!("collect", side = %side).entered();
            let (input, selection) = request.input(side);
            self.collect(side, input, selection, &mut warnings)
        };
        let reference = collect_side(Side::Reference)?;
        let measured = collect_side(Side::Measured)?;

        let result =
            self.compare_collections(&reference.collection, &measured.collection, progress);
        Ok(Comparison {
            result,
            reference_column: reference.column,
            measured_column: measured.column,
            warnings,
        })
    }

    /// Reconciles and classifies two already built collections.
    pub fn compare_collections(
        &self,
        reference: &SerialCollection,
        measured: &SerialCollection,
        progress: &dyn ProgressSink,
    ) -> ReconciliationResult {
        let sets = {
            let _span = info_span!("reconcile").entered();
            reconcile(reference, measured)
        };
        let match_percentage = sets.match_percentage();
        info!(
            reference = reference.len(),
            measured = measured.len(),
            matched = sets.matched.len(),
            missing = sets.missing.len(),
            extra = sets.extra.len(),
            match_percentage,
            "sets reconciled"
        );

        let (missing_details, extra_details) = {
            let _span = info_span!("classify").entered();
            (
                self.classifier
                    .classify_all(&sets.missing, Side::Reference, measured, progress),
                self.classifier
                    .classify_all(&sets.extra, Side::Measured, reference, progress),
            )
        };

        ReconciliationResult {
            reference_total: reference.len(),
            measured_total: measured.len(),
            matched_count: sets.matched.len(),
            missing_count: sets.missing.len(),
            extra_count: sets.extra.len(),
            match_percentage,
            matched: sets.matched,
            missing: sets.missing,
            extra: sets.extra,
            missing_details,
            extra_details,
        }
    }
}

/// Runs one comparison with the given options.
///
/// # Errors
///
/// Returns an error for invalid options or an explicit column selection that
/// cannot be honoured.
pub fn compare(
    request: &CompareRequest<'_>,
    options: &ReconOptions,
    progress: &dyn ProgressSink,
) -> Result<Comparison> {
    ReconEngine::new(options)?.compare(request, progress)
}
