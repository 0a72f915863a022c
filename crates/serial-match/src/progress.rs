//! Progress reporting for long classification passes.

use std::sync::atomic::{AtomicUsize, Ordering};

use serial_model::Side;

/// Receives progress while unmatched serials are classified.
///
/// Implementations must be shareable across worker threads; calls may arrive
/// from any thread and in any order.
pub trait ProgressSink: Sync {
    /// A pass over `total` serials of `side` is starting.
    fn begin(&self, side: Side, total: usize) {
        let _ = (side, total);
    }

    /// `delta` more serials have been classified.
    fn advance(&self, side: Side, delta: usize);

    /// The pass over `side` has finished.
    fn finish(&self, side: Side) {
        let _ = side;
    }
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&self, _side: Side, _delta: usize) {}
}

/// Atomic counters a caller can poll from another thread.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    processed: AtomicUsize,
    total: AtomicUsize,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serials classified so far, across both sides.
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Acquire)
    }

    /// Serials announced so far, across both sides.
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Acquire)
    }
}

impl ProgressSink for ProgressCounter {
    fn begin(&self, _side: Side, total: usize) {
        self.total.fetch_add(total, Ordering::AcqRel);
    }

    fn advance(&self, _side: Side, delta: usize) {
        self.processed.fetch_add(delta, Ordering::AcqRel);
    }
}
