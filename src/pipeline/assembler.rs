//! The orchestrator composing the four reconstruction stages.

use rayon::prelude::*;
use tracing::debug;

use crate::core::{CharacterSource, OcrResult, PipelineConfig};
use crate::domain::{DisplayTable, LabelTable, PLATE_LENGTH, RawDetection, ReconstructedSequence};
use crate::processors::{
    DetectionNormalizer, DuplicateResolver, GapReconstructor, GapReport, SequenceFormatter,
};

use super::result::PlateReadout;
use super::stats::ReconstructionStats;

/// Assembles plate readouts from raw character detections.
///
/// One assembler holds the validated configuration and the injected mapping
/// tables; each call to [`assemble`](Self::assemble) is a pure function of
/// its batch, so batches may be processed concurrently with no coordination.
#[derive(Debug, Clone)]
pub struct PlateAssembler {
    config: PipelineConfig,
    normalizer: DetectionNormalizer,
    resolver: DuplicateResolver,
    reconstructor: GapReconstructor,
    formatter: SequenceFormatter,
}

impl PlateAssembler {
    /// Creates an assembler from a configuration and a label table.
    ///
    /// The display table defaults to identity rendering; override it with
    /// [`with_display`](Self::with_display).
    pub fn new(config: PipelineConfig, labels: LabelTable) -> OcrResult<Self> {
        config.validate()?;
        let normalizer =
            DetectionNormalizer::new(labels).with_min_confidence(config.min_confidence);
        let resolver = DuplicateResolver::new(config.duplicate_tolerance);
        Ok(Self {
            config,
            normalizer,
            resolver,
            reconstructor: GapReconstructor::new(),
            formatter: SequenceFormatter::default(),
        })
    }

    /// Replaces the formatter's display table.
    pub fn with_display(mut self, display: DisplayTable) -> Self {
        self.formatter = SequenceFormatter::new(display);
        self
    }

    /// The assembler's configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Assembles one detection batch into a plate readout.
    ///
    /// `Err` is reserved for input-contract violations; every geometric
    /// outcome, including total reconstruction failure, comes back as a
    /// readout whose payload says what happened.
    pub fn assemble(&self, raw: &[RawDetection]) -> OcrResult<PlateReadout> {
        let normalized = self.normalizer.normalize(raw)?;
        let before_dedup = normalized.len();
        let detections = self.resolver.resolve(normalized);
        let duplicates_merged = before_dedup - detections.len();

        let (sequence, report) = if detections.len() == PLATE_LENGTH {
            // A full read needs no gap analysis.
            (
                ReconstructedSequence::from_detections(&detections),
                GapReport::default(),
            )
        } else {
            self.reconstructor.reconstruct(&detections)
        };

        let stats = ReconstructionStats {
            duplicates_merged,
            placeholders_inserted: sequence.placeholder_count(),
            ambiguous_geometry: report.ambiguous_geometry,
            fallback: report.fallback,
        };
        debug!(
            detections = detections.len(),
            duplicates_merged,
            placeholders = stats.placeholders_inserted,
            "assembled detection batch"
        );

        Ok(PlateReadout {
            plate: self.formatter.format(&sequence),
            stats,
        })
    }

    /// Assembles many detection batches.
    ///
    /// Batches beyond the configured threshold fan out over the rayon thread
    /// pool; results keep the input order either way.
    pub fn assemble_batch(&self, batches: &[Vec<RawDetection>]) -> Vec<OcrResult<PlateReadout>> {
        if batches.len() > self.config.parallel.batch_threshold {
            batches.par_iter().map(|batch| self.assemble(batch)).collect()
        } else {
            batches.iter().map(|batch| self.assemble(batch)).collect()
        }
    }

    /// Runs the upstream detector on one frame and assembles the result.
    pub fn assemble_from<S: CharacterSource>(
        &self,
        source: &mut S,
        frame: &S::Frame,
    ) -> OcrResult<PlateReadout> {
        let raw = source.detect(frame)?;
        self.assemble(&raw)
    }
}
