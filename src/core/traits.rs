//! The seam between the pipeline and the upstream character detector.

use super::errors::OcrResult;
use crate::domain::RawDetection;

/// A black-box source of per-character detections.
///
/// The reconstruction pipeline never looks inside the detector: it consumes
/// whatever finite set of detections the source returns for one frame, in any
/// order, possibly empty. Implementations typically wrap an object-detection
/// model; tests wrap a fixture.
pub trait CharacterSource {
    /// The input the detector consumes (an image handle, a frame buffer, a
    /// file path — the pipeline does not care).
    type Frame;

    /// Runs detection on one frame and returns the raw character detections.
    fn detect(&mut self, frame: &Self::Frame) -> OcrResult<Vec<RawDetection>>;
}
