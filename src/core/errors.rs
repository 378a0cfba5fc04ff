//! Error types for the plate reconstruction pipeline.
//!
//! Two families of errors exist, and they deliberately do not mix:
//!
//! * [`OcrError`] covers input-contract violations (an unknown detector class
//!   id, a confidence outside `[0, 1]`, an invalid configuration). These are
//!   the only errors the pipeline ever returns as `Err`.
//! * [`ReconstructionError`] describes why gap reconstruction could not place
//!   the missing characters. It never escapes as `Err`: the reconstructor
//!   converts it into the uniform all-placeholder sequence and the reason is
//!   reported through the run statistics, so degraded reconstructions stay
//!   observable without turning geometry into control flow.

use thiserror::Error;

/// Errors that the pipeline reports to its caller.
#[derive(Error, Debug)]
pub enum OcrError {
    /// A detector class id has no entry in the injected label table.
    #[error("unknown character class id {class_id}")]
    UnknownClassId { class_id: u32 },

    /// A detection violated the upstream input contract.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Pipeline configuration failed validation.
    #[error("invalid configuration: {message}")]
    ConfigError { message: String },
}

impl OcrError {
    /// Creates an `InvalidInput` error from any displayable message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        OcrError::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a `ConfigError` from any displayable message.
    pub fn config(message: impl Into<String>) -> Self {
        OcrError::ConfigError {
            message: message.into(),
        }
    }
}

/// Convenient result alias for pipeline operations.
pub type OcrResult<T> = Result<T, OcrError>;

/// Reasons gap reconstruction falls back to the all-placeholder sequence.
///
/// Carried in [`ReconstructionStats`](crate::pipeline::ReconstructionStats)
/// rather than propagated, per the propagation policy above.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconstructionError {
    /// Fewer detections survived merging than any insertion rule can repair.
    #[error("{count} detections after merging, too few to reconstruct")]
    InsufficientDetections { count: usize },

    /// More detections survived merging than one plate can hold.
    #[error("{count} detections after merging, more than one plate's worth")]
    SurplusDetections { count: usize },

    /// The minimum inter-character gap is zero, so gap ratios are undefined.
    #[error("minimum inter-character gap is zero, gap ratios are undefined")]
    DegenerateGeometry,

    /// The observed gap pattern matches no insertion rule.
    #[error("gap pattern with {medium} medium gaps has no insertion rule")]
    UnresolvedGapPattern { medium: usize },
}
