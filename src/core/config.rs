//! Configuration for the reconstruction pipeline.
//!
//! Configuration follows the same shape everywhere: serde-derived structs
//! with per-field defaults, `with_*` builder methods, and a `validate()`
//! that reports a [`ConfigError`] before the pipeline is ever built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::errors::OcrError;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The duplicate tolerance must not be negative.
    #[error("duplicate tolerance must be non-negative, got {value}")]
    InvalidDuplicateTolerance { value: i32 },

    /// The confidence threshold must lie in `[0, 1]`.
    #[error("confidence threshold must be between 0.0 and 1.0, got {value}")]
    InvalidConfidenceThreshold { value: f32 },

    /// The batch threshold must be greater than zero.
    #[error("batch threshold must be greater than 0")]
    InvalidBatchThreshold,
}

impl From<ConfigError> for OcrError {
    fn from(error: ConfigError) -> Self {
        OcrError::ConfigError {
            message: error.to_string(),
        }
    }
}

/// Configuration for parallel processing behavior in batch assembly.
///
/// Batches at or below the threshold are processed sequentially; larger
/// batches fan out over the rayon thread pool. One detection batch is always
/// processed on a single thread regardless of this policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// Batch sizes `<=` this value are processed sequentially.
    /// Default: 10.
    #[serde(default = "ParallelPolicy::default_batch_threshold")]
    pub batch_threshold: usize,
}

impl ParallelPolicy {
    /// Creates a new ParallelPolicy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the batch processing threshold.
    pub fn with_batch_threshold(mut self, threshold: usize) -> Self {
        self.batch_threshold = threshold;
        self
    }

    fn default_batch_threshold() -> usize {
        10
    }
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            batch_threshold: Self::default_batch_threshold(),
        }
    }
}

/// Configuration for the plate reconstruction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum difference between the `left + right` edge sums of two
    /// neighboring boxes for them to count as duplicates of one character.
    /// Default: 1 pixel.
    #[serde(default = "PipelineConfig::default_duplicate_tolerance")]
    pub duplicate_tolerance: i32,

    /// Detections below this confidence are dropped before normalization.
    /// Default: 0.0 (keep everything the detector returned).
    #[serde(default)]
    pub min_confidence: f32,

    /// Parallel processing policy for batch assembly.
    #[serde(default)]
    pub parallel: ParallelPolicy,
}

impl PipelineConfig {
    /// Creates a new PipelineConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duplicate tolerance in pixels.
    pub fn with_duplicate_tolerance(mut self, tolerance: i32) -> Self {
        self.duplicate_tolerance = tolerance;
        self
    }

    /// Sets the minimum confidence threshold.
    pub fn with_min_confidence(mut self, threshold: f32) -> Self {
        self.min_confidence = threshold;
        self
    }

    /// Sets the parallel processing policy.
    pub fn with_parallel(mut self, policy: ParallelPolicy) -> Self {
        self.parallel = policy;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duplicate_tolerance < 0 {
            return Err(ConfigError::InvalidDuplicateTolerance {
                value: self.duplicate_tolerance,
            });
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::InvalidConfidenceThreshold {
                value: self.min_confidence,
            });
        }
        if self.parallel.batch_threshold == 0 {
            return Err(ConfigError::InvalidBatchThreshold);
        }
        Ok(())
    }

    fn default_duplicate_tolerance() -> i32 {
        1
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            duplicate_tolerance: Self::default_duplicate_tolerance(),
            min_confidence: 0.0,
            parallel: ParallelPolicy::default(),
        }
    }
}
