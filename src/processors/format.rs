//! Rendering of the reconstructed sequence into the fixed display segments.

use tracing::warn;

use crate::domain::{DisplayTable, PLATE_LENGTH, ReconstructedSequence};
use crate::utils::median;

/// The marker every segment carries when the length contract is violated.
pub const ERROR_MARKER: &str = "Error";
/// The fixed literal separator segment.
pub const SEGMENT_SEPARATOR: &str = "-";

/// The five display segments plus the aggregate confidence.
///
/// A failed formatting attempt is itself a value: every segment reads
/// [`ERROR_MARKER`] and the confidence is absent. Callers tell the two
/// apart by inspecting the payload, never by catching anything.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedPlate {
    /// The display segments: two slots, one slot, three slots, the literal
    /// separator, two slots.
    pub segments: [String; 5],
    /// Median confidence of the surviving real detections; absent when no
    /// real detection remains (or on failure).
    pub confidence: Option<f32>,
}

impl FormattedPlate {
    /// The declared-failure readout.
    pub fn failure() -> Self {
        Self {
            segments: std::array::from_fn(|_| ERROR_MARKER.to_string()),
            confidence: None,
        }
    }

    /// Returns true if this is the declared-failure readout.
    pub fn is_failure(&self) -> bool {
        self.segments.iter().all(|s| s == ERROR_MARKER)
    }

    /// The segments joined into one display string.
    pub fn text(&self) -> String {
        self.segments.concat()
    }
}

/// Renders an exactly-eight-slot sequence into the fixed segment layout.
///
/// The formatter owns the injected display table; the slot-to-segment
/// boundaries and the separator are fixed by the plate layout and are not
/// configurable.
#[derive(Debug, Clone, Default)]
pub struct SequenceFormatter {
    display: DisplayTable,
}

impl SequenceFormatter {
    /// Creates a formatter around the caller's display table.
    pub fn new(display: DisplayTable) -> Self {
        Self { display }
    }

    /// Formats a reconstructed sequence.
    ///
    /// The eight-slot length is the one hard contract in the pipeline: any
    /// other length yields the declared-failure readout instead of an
    /// out-of-range slice. An all-placeholder sequence of the right length
    /// is NOT a failure; it renders as the sentinel-filled string with no
    /// confidence.
    pub fn format(&self, sequence: &ReconstructedSequence) -> FormattedPlate {
        let slots = sequence.slots();
        if slots.len() != PLATE_LENGTH {
            warn!(
                len = slots.len(),
                "sequence length violates the eight-slot contract"
            );
            return FormattedPlate::failure();
        }

        let render = |range: std::ops::Range<usize>| -> String {
            slots[range]
                .iter()
                .map(|slot| self.display.render(slot.label))
                .collect()
        };
        let segments = [
            render(0..2),
            render(2..3),
            render(3..6),
            SEGMENT_SEPARATOR.to_string(),
            render(6..8),
        ];

        let confidences: Vec<f32> = slots.iter().filter_map(|slot| slot.confidence).collect();
        FormattedPlate {
            segments,
            confidence: median(&confidences),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CharacterLabel, SequenceSlot};

    fn slot(value: u8, confidence: f32) -> SequenceSlot {
        SequenceSlot::detected(CharacterLabel::Digit(value), confidence)
    }

    fn formatter() -> SequenceFormatter {
        SequenceFormatter::new(DisplayTable::new())
    }

    #[test]
    fn test_segments_follow_the_fixed_layout() {
        // A full read of digits 3 1 0 2 5 4 7 9.
        let digits = [3u8, 1, 0, 2, 5, 4, 7, 9];
        let slots: Vec<SequenceSlot> = digits.iter().map(|&d| slot(d, 0.9)).collect();
        let plate = formatter().format(&ReconstructedSequence::new(slots));
        assert_eq!(
            plate.segments,
            [
                "31".to_string(),
                "0".to_string(),
                "254".to_string(),
                "-".to_string(),
                "79".to_string()
            ]
        );
        assert_eq!(plate.text(), "310254-79");
        assert!(!plate.is_failure());
    }

    #[test]
    fn test_wrong_length_yields_declared_failure() {
        let slots: Vec<SequenceSlot> = (0..7u8).map(|d| slot(d, 0.9)).collect();
        let plate = formatter().format(&ReconstructedSequence::new(slots));
        assert!(plate.is_failure());
        assert!(plate.segments.iter().all(|s| s == ERROR_MARKER));
        assert_eq!(plate.confidence, None);
    }

    #[test]
    fn test_all_placeholders_render_not_error() {
        // Well-formed but empty of evidence; must not read as an error.
        let plate = formatter().format(&ReconstructedSequence::all_placeholders());
        assert!(!plate.is_failure());
        assert_eq!(plate.text(), "******-**");
        assert_eq!(plate.confidence, None);
    }

    #[test]
    fn test_placeholders_render_as_sentinel_between_digits() {
        let mut slots: Vec<SequenceSlot> = (0..8u8).map(|d| slot(d, 0.8)).collect();
        slots[3] = SequenceSlot::placeholder();
        let plate = formatter().format(&ReconstructedSequence::new(slots));
        assert_eq!(plate.segments[2], "*45");
    }

    #[test]
    fn test_confidence_is_median_of_real_slots() {
        let mut slots: Vec<SequenceSlot> = Vec::new();
        for (i, &c) in [0.2f32, 0.4, 0.6, 0.8, 1.0].iter().enumerate() {
            slots.push(slot(i as u8, c));
        }
        slots.push(SequenceSlot::placeholder());
        slots.push(SequenceSlot::placeholder());
        slots.push(SequenceSlot::placeholder());
        let plate = formatter().format(&ReconstructedSequence::new(slots));
        assert_eq!(plate.confidence, Some(0.6));
    }

    #[test]
    fn test_display_overrides_apply_to_letters() {
        let mut slots: Vec<SequenceSlot> = (0..8u8).map(|d| slot(d, 0.8)).collect();
        slots[2] = SequenceSlot::detected(CharacterLabel::Letter('B'), 0.8);
        let table = DisplayTable::new().with_override('B', "ب");
        let plate = SequenceFormatter::new(table).format(&ReconstructedSequence::new(slots));
        assert_eq!(plate.segments[1], "ب");
    }

    #[test]
    fn test_formatter_is_total_on_any_eight_slots() {
        // Mixed real/placeholder patterns must never panic.
        for mask in 0u32..256 {
            let slots: Vec<SequenceSlot> = (0..8u8)
                .map(|i| {
                    if mask & (1 << i) != 0 {
                        SequenceSlot::placeholder()
                    } else {
                        slot(i, 0.5)
                    }
                })
                .collect();
            let plate = formatter().format(&ReconstructedSequence::new(slots));
            assert!(!plate.is_failure());
            assert_eq!(plate.segments[3], SEGMENT_SEPARATOR);
        }
    }
}
