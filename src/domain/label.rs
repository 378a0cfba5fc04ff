//! Character labels and the caller-supplied mapping tables.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{OcrError, OcrResult};

/// The glyph used to render a slot whose character was never detected.
pub const PLACEHOLDER_GLYPH: char = '*';

/// A character drawn from the closed plate alphabet.
///
/// The variants carry the identity; branching on what kind of character a
/// slot holds is always done on the tag, never on a rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterLabel {
    /// A digit 0–9.
    Digit(u8),
    /// A letter or symbol token from the plate alphabet.
    Letter(char),
    /// Position known, identity unknown.
    Placeholder,
}

impl CharacterLabel {
    /// Returns true if this label is a digit.
    pub fn is_digit(&self) -> bool {
        matches!(self, CharacterLabel::Digit(_))
    }

    /// Returns true if this label is a letter.
    pub fn is_letter(&self) -> bool {
        matches!(self, CharacterLabel::Letter(_))
    }

    /// Returns true if this label is the placeholder sentinel.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, CharacterLabel::Placeholder)
    }
}

impl fmt::Display for CharacterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterLabel::Digit(d) => write!(f, "{}", d),
            CharacterLabel::Letter(c) => write!(f, "{}", c),
            CharacterLabel::Placeholder => write!(f, "{}", PLACEHOLDER_GLYPH),
        }
    }
}

/// Immutable mapping from detector class ids to character labels.
///
/// The table is supplied by the caller (typically deserialized from the
/// mapping file shipped next to the detection model) and injected into the
/// pipeline; nothing in the crate consults a process-wide lookup. Entries
/// should map to `Digit` or `Letter` only — a detector has no placeholder
/// class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelTable {
    labels: HashMap<u32, CharacterLabel>,
}

impl LabelTable {
    /// Creates an empty label table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table mapping class ids 0–9 to the matching digits.
    ///
    /// This is the conventional head of a character-detector class list;
    /// letter classes are added on top with [`insert`](Self::insert).
    pub fn digits() -> Self {
        let labels = (0..10u32)
            .map(|id| (id, CharacterLabel::Digit(id as u8)))
            .collect();
        Self { labels }
    }

    /// Builds a table from `(class_id, label)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, CharacterLabel)>) -> Self {
        Self {
            labels: pairs.into_iter().collect(),
        }
    }

    /// Parses a table from its JSON representation.
    pub fn from_json_str(json: &str) -> OcrResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| OcrError::invalid_input(format!("label table: {}", e)))
    }

    /// Adds or replaces one mapping.
    pub fn insert(&mut self, class_id: u32, label: CharacterLabel) {
        self.labels.insert(class_id, label);
    }

    /// Looks up the label for a class id.
    pub fn get(&self, class_id: u32) -> Option<CharacterLabel> {
        self.labels.get(&class_id).copied()
    }

    /// Looks up the label for a class id, failing on unknown ids.
    pub fn resolve(&self, class_id: u32) -> OcrResult<CharacterLabel> {
        self.get(class_id)
            .ok_or(OcrError::UnknownClassId { class_id })
    }

    /// Returns the number of mapped classes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the table has no mappings.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Immutable mapping from character labels to display glyphs.
///
/// Digits and letters render as themselves unless a letter has an override;
/// overrides carry the native-script glyphs when the detector's class names
/// are transliterations. The placeholder always renders as
/// [`PLACEHOLDER_GLYPH`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayTable {
    #[serde(default)]
    overrides: HashMap<char, String>,
}

impl DisplayTable {
    /// Creates an identity display table (every label renders as itself).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a glyph override for one letter.
    pub fn with_override(mut self, letter: char, glyph: impl Into<String>) -> Self {
        self.overrides.insert(letter, glyph.into());
        self
    }

    /// Renders one label to its display form.
    pub fn render(&self, label: CharacterLabel) -> String {
        match label {
            CharacterLabel::Digit(d) => d.to_string(),
            CharacterLabel::Letter(c) => self
                .overrides
                .get(&c)
                .cloned()
                .unwrap_or_else(|| c.to_string()),
            CharacterLabel::Placeholder => PLACEHOLDER_GLYPH.to_string(),
        }
    }
}
