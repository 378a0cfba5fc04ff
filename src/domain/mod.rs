//! Domain-level structures shared across the reconstruction pipeline.
//!
//! This module groups the data types that represent plate-reading concepts:
//! character labels and their mapping tables, raw and normalized detections,
//! and the reconstructed slot sequence.

pub mod detection;
pub mod label;
pub mod sequence;

pub use detection::{Detection, RawDetection};
pub use label::{CharacterLabel, DisplayTable, LabelTable, PLACEHOLDER_GLYPH};
pub use sequence::{PLATE_LENGTH, ReconstructedSequence, SequenceSlot};
