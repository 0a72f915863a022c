//! Exact set comparison between two serial collections.

use serial_model::{SerialCollection, SerialKey};

/// Outcome of the exact comparison, each list in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetReconciliation {
    /// In both collections.
    pub matched: Vec<SerialKey>,
    /// In the reference but not the measured collection.
    pub missing: Vec<SerialKey>,
    /// In the measured but not the reference collection.
    pub extra: Vec<SerialKey>,
}

impl SetReconciliation {
    /// Percentage of reference serials found, see [`match_percentage`].
    pub fn match_percentage(&self) -> f64 {
        match_percentage(self.matched.len(), self.matched.len() + self.missing.len())
    }
}

/// Splits two collections into matched, missing and extra serials.
pub fn reconcile(reference: &SerialCollection, measured: &SerialCollection) -> SetReconciliation {
    let reference_keys = reference.keys();
    let measured_keys = measured.keys();
    SetReconciliation {
        matched: reference_keys.intersection(measured_keys).cloned().collect(),
        missing: reference_keys.difference(measured_keys).cloned().collect(),
        extra: measured_keys.difference(reference_keys).cloned().collect(),
    }
}

/// `matched / reference * 100` rounded to two decimals; 0 for an empty reference.
pub fn match_percentage(matched: usize, reference: usize) -> f64 {
    if reference == 0 {
        return 0.0;
    }
    let raw = matched as f64 / reference as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
