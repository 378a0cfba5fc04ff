//! Merging of detections the detector split into overlapping boxes.

use tracing::debug;

use crate::domain::Detection;

/// Collapses detections whose horizontal spans are effectively co-located.
///
/// The detector sometimes fires twice on one physical character, yielding two
/// boxes whose `left + right` edge sums differ by at most a near-zero pixel
/// tolerance. Within such a pair the lower-confidence detection is dropped;
/// an exact confidence tie drops the later one.
///
/// One left-to-right pass suffices: each incoming detection is compared
/// against the most recent survivor, and when a merge pulls the survivor
/// within tolerance of its own left neighbor the merge keeps folding leftward
/// until the spacing holds. After the pass no two adjacent survivors are
/// within tolerance, which also makes the resolver idempotent.
///
/// Empty and single-element sequences are returned unchanged; there is
/// nothing to compare.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateResolver {
    tolerance: i32,
}

impl DuplicateResolver {
    /// Creates a resolver with the given edge-sum tolerance in pixels.
    pub fn new(tolerance: i32) -> Self {
        Self { tolerance }
    }

    /// Removes duplicate detections from a center-ordered sequence.
    ///
    /// The caller can recover the number of merged entries from the length
    /// difference between input and output.
    pub fn resolve(&self, detections: Vec<Detection>) -> Vec<Detection> {
        if detections.len() < 2 {
            return detections;
        }

        let mut survivors: Vec<Detection> = Vec::with_capacity(detections.len());
        for detection in detections {
            let mut incoming = detection;
            while let Some(&last) = survivors.last() {
                // The sort key is the rounded center, so spans that collapse
                // to the same center can arrive a pixel out of order; the
                // signed difference still flags them.
                if incoming.edge_sum - last.edge_sum > self.tolerance {
                    break;
                }
                survivors.pop();
                let (kept, dropped) = if last.confidence >= incoming.confidence {
                    (last, incoming)
                } else {
                    (incoming, last)
                };
                debug!(kept = %kept.label, dropped = %dropped.label, "merging co-located detections");
                incoming = kept;
            }
            survivors.push(incoming);
        }
        survivors
    }
}
