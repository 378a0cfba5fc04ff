//! The reconstructed slot sequence handed to the formatter.

use super::detection::Detection;
use super::label::CharacterLabel;

/// Number of character slots on a plate.
pub const PLATE_LENGTH: usize = 8;

/// One slot of the reconstructed sequence: either a surviving real detection
/// or a synthetic placeholder marking a character the detector missed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceSlot {
    /// The character in this slot.
    pub label: CharacterLabel,
    /// The detector confidence; placeholders carry none.
    pub confidence: Option<f32>,
}

impl SequenceSlot {
    /// A slot backed by a real detection.
    pub fn detected(label: CharacterLabel, confidence: f32) -> Self {
        Self {
            label,
            confidence: Some(confidence),
        }
    }

    /// A synthetic slot for an undetected character.
    pub fn placeholder() -> Self {
        Self {
            label: CharacterLabel::Placeholder,
            confidence: None,
        }
    }

    /// Returns true if this slot is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.label.is_placeholder()
    }
}

impl From<&Detection> for SequenceSlot {
    fn from(detection: &Detection) -> Self {
        SequenceSlot::detected(detection.label, detection.confidence)
    }
}

/// An ordered slot sequence, built fresh by reconstruction and immutable once
/// formatting begins. Expected to hold exactly [`PLATE_LENGTH`] slots; the
/// formatter enforces that as its hard contract.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReconstructedSequence {
    slots: Vec<SequenceSlot>,
}

impl ReconstructedSequence {
    /// Wraps an already-assembled slot list.
    pub fn new(slots: Vec<SequenceSlot>) -> Self {
        Self { slots }
    }

    /// The uniform reconstruction-failure sequence: all slots placeholders.
    pub fn all_placeholders() -> Self {
        Self {
            slots: vec![SequenceSlot::placeholder(); PLATE_LENGTH],
        }
    }

    /// Builds a sequence of real slots from detections, keeping their order.
    pub fn from_detections(detections: &[Detection]) -> Self {
        Self {
            slots: detections.iter().map(SequenceSlot::from).collect(),
        }
    }

    /// The slots in left-to-right order.
    pub fn slots(&self) -> &[SequenceSlot] {
        &self.slots
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the sequence holds no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of placeholder slots.
    pub fn placeholder_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_placeholder()).count()
    }

    /// Returns true if the sequence has exactly [`PLATE_LENGTH`] slots.
    pub fn is_plate_length(&self) -> bool {
        self.slots.len() == PLATE_LENGTH
    }

    /// Drops excess placeholders, left-most first, until the sequence is back
    /// at [`PLATE_LENGTH`] or no placeholder remains. Real detections are
    /// never removed here.
    pub(crate) fn trim_to_plate_length(&mut self) {
        let mut excess = self.slots.len().saturating_sub(PLATE_LENGTH);
        if excess == 0 {
            return;
        }
        let mut kept = Vec::with_capacity(PLATE_LENGTH);
        for slot in self.slots.drain(..) {
            if excess > 0 && slot.is_placeholder() {
                excess -= 1;
                continue;
            }
            kept.push(slot);
        }
        self.slots = kept;
    }
}
