//! # plate-ocr
//!
//! A Rust library that reconstructs fixed-format plate strings from
//! per-character object-detector output.
//!
//! The upstream detector is a black box: given an image it returns a finite,
//! unordered set of detections, each a horizontal bounding span, a class
//! label, and a confidence. Detectors over-count (two boxes on one
//! character), under-count (a character missed entirely), and return results
//! in arbitrary order. This crate turns that raw set into the plate's
//! eight-slot, five-segment display string, flagging every repair it had to
//! guess.
//!
//! ## Pipeline
//!
//! - **Normalization**: class ids resolved through the injected label table,
//!   detections ordered by box center
//! - **Duplicate merging**: co-located spans collapsed onto the
//!   higher-confidence detection
//! - **Gap reconstruction**: missing characters located by gap-ratio
//!   evidence and filled with placeholder slots
//! - **Formatting**: the eight slots sliced into the fixed display segments,
//!   with the median confidence of the surviving detections
//!
//! ## Modules
//!
//! * [`core`] - configuration, error handling, and the detector seam
//! * [`domain`] - labels, detections, and the slot sequence
//! * [`processors`] - the four reconstruction stages
//! * [`pipeline`] - the per-batch orchestrator, results, and statistics
//! * [`utils`] - small shared helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use plate_ocr::prelude::*;
//!
//! # fn main() -> Result<(), OcrError> {
//! let labels = LabelTable::digits();
//! let assembler = PlateAssembler::new(PipelineConfig::default(), labels)?;
//!
//! // Eight evenly spaced character boxes from the detector.
//! let digits = [3u32, 1, 0, 2, 5, 4, 7, 9];
//! let detections: Vec<RawDetection> = digits
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &class_id)| {
//!         RawDetection::new(i as i32 * 20, i as i32 * 20 + 10, 0.95, class_id)
//!     })
//!     .collect();
//!
//! let readout = assembler.assemble(&detections)?;
//! assert_eq!(readout.text(), "310254-79");
//! assert!(readout.is_exact());
//! # Ok(())
//! # }
//! ```
//!
//! A degraded read is still a readout, not an error: placeholders show up as
//! `*` in the segments and in the statistics, while the hard `"Error"`
//! readout is reserved for a violated length contract.

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use plate_ocr::prelude::*;
/// ```
///
/// Included items cover the common path: the assembler and its
/// configuration, the mapping tables, the detection input type, and the
/// readout output types. For the individual processors, import from
/// [`crate::processors`] directly.
pub mod prelude {
    pub use crate::core::{CharacterSource, OcrError, OcrResult, PipelineConfig};
    pub use crate::domain::{CharacterLabel, DisplayTable, LabelTable, RawDetection};
    pub use crate::pipeline::{BatchStats, PlateAssembler, PlateReadout};
}
