//! Normalization of raw detector output into a canonical ordered sequence.

use crate::core::{OcrError, OcrResult};
use crate::domain::{Detection, LabelTable, RawDetection};

/// Converts raw detections into canonical records ordered by box center.
///
/// Normalization resolves class ids through the injected label table, derives
/// the center / edge-sum coordinates, and establishes the ascending center-x
/// order the rest of the pipeline relies on. The sort is stable, so
/// detections whose boxes round to the same center keep the detector's
/// original order. Empty input is not an error; it normalizes to an empty
/// sequence.
#[derive(Debug, Clone)]
pub struct DetectionNormalizer {
    labels: LabelTable,
    min_confidence: f32,
}

impl DetectionNormalizer {
    /// Creates a normalizer around the caller's label table.
    pub fn new(labels: LabelTable) -> Self {
        Self {
            labels,
            min_confidence: 0.0,
        }
    }

    /// Sets the confidence threshold below which detections are dropped.
    pub fn with_min_confidence(mut self, threshold: f32) -> Self {
        self.min_confidence = threshold;
        self
    }

    /// Normalizes one detector batch into a center-ordered sequence.
    ///
    /// Fails on a confidence outside `[0, 1]` or a class id missing from the
    /// label table; both are upstream contract violations, not geometry.
    pub fn normalize(&self, raw: &[RawDetection]) -> OcrResult<Vec<Detection>> {
        let mut detections = Vec::with_capacity(raw.len());
        for detection in raw {
            if !(0.0..=1.0).contains(&detection.confidence) {
                return Err(OcrError::invalid_input(format!(
                    "confidence {} is out of range [0, 1]",
                    detection.confidence
                )));
            }
            if detection.confidence < self.min_confidence {
                continue;
            }
            let label = self.labels.resolve(detection.class_id)?;
            detections.push(Detection::from_raw(detection, label));
        }
        detections.sort_by_key(|d| d.center_x);
        Ok(detections)
    }
}
