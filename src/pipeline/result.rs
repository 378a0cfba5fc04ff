//! The pipeline's per-batch result type.

use crate::processors::FormattedPlate;

use super::stats::ReconstructionStats;

/// Everything the pipeline produced for one detection batch: the formatted
/// plate and the statistics describing how much repair it needed.
///
/// Three shapes are worth telling apart, all by inspecting the payload:
/// a clean read ([`is_exact`](Self::is_exact)), a low-confidence guess with
/// placeholders present, and the hard failure
/// ([`is_failure`](Self::is_failure)) when the eight-slot contract could not
/// be met.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateReadout {
    /// The five display segments plus the aggregate confidence.
    pub plate: FormattedPlate,
    /// What reconstruction did to get there.
    pub stats: ReconstructionStats,
}

impl PlateReadout {
    /// The display segments joined into one string.
    pub fn text(&self) -> String {
        self.plate.text()
    }

    /// Median confidence of the surviving real detections.
    pub fn confidence(&self) -> Option<f32> {
        self.plate.confidence
    }

    /// Returns true for the declared-failure readout.
    pub fn is_failure(&self) -> bool {
        self.plate.is_failure()
    }

    /// Returns true when every slot was read from a real detection and no
    /// repair was guessed.
    pub fn is_exact(&self) -> bool {
        !self.is_failure() && !self.stats.is_degraded()
    }
}
