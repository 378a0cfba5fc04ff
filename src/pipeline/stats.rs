//! Reconstruction statistics.
//!
//! Per-readout statistics record how much repair one batch needed; the
//! aggregate [`BatchStats`] tracks outcome counts across many readouts so
//! callers can monitor how often reconstruction degrades.

use std::fmt;

use crate::core::ReconstructionError;

use super::result::PlateReadout;

/// What the pipeline did to one detection batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconstructionStats {
    /// Detections merged away as duplicates of a neighbor.
    pub duplicates_merged: usize,
    /// Placeholder slots present in the formatted sequence.
    pub placeholders_inserted: usize,
    /// True when the gap evidence was contradictory and the conservative
    /// compromise was applied.
    pub ambiguous_geometry: bool,
    /// Why reconstruction fell back to the all-placeholder sequence, if it
    /// did.
    pub fallback: Option<ReconstructionError>,
}

impl ReconstructionStats {
    /// Returns true if this readout is anything less than a clean
    /// eight-detection read.
    pub fn is_degraded(&self) -> bool {
        self.placeholders_inserted > 0 || self.ambiguous_geometry || self.fallback.is_some()
    }
}

/// Outcome counts across a batch of readouts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Total readouts recorded.
    pub total_processed: usize,
    /// Readouts with every slot backed by a real detection.
    pub complete: usize,
    /// Readouts carrying at least one placeholder.
    pub partial: usize,
    /// Declared-failure readouts.
    pub failed: usize,
}

impl BatchStats {
    /// Creates zeroed batch statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates statistics over a set of readouts.
    pub fn from_readouts<'a>(readouts: impl IntoIterator<Item = &'a PlateReadout>) -> Self {
        let mut stats = Self::new();
        for readout in readouts {
            stats.record(readout);
        }
        stats
    }

    /// Records one readout.
    pub fn record(&mut self, readout: &PlateReadout) {
        self.total_processed += 1;
        if readout.is_failure() {
            self.failed += 1;
        } else if readout.stats.placeholders_inserted > 0 {
            self.partial += 1;
        } else {
            self.complete += 1;
        }
    }

    /// Fraction of readouts that formatted successfully, as a percentage.
    pub fn success_rate(&self) -> f64 {
        if self.total_processed == 0 {
            0.0
        } else {
            ((self.complete + self.partial) as f64 / self.total_processed as f64) * 100.0
        }
    }
}

impl fmt::Display for BatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Batch statistics:")?;
        writeln!(f, "  Total processed: {}", self.total_processed)?;
        writeln!(f, "  Complete: {}", self.complete)?;
        writeln!(f, "  Partial: {}", self.partial)?;
        writeln!(f, "  Failed: {}", self.failed)?;
        writeln!(f, "  Success rate: {:.1}%", self.success_rate())?;
        Ok(())
    }
}
