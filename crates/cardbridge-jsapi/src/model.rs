//! Read models and operations exchanged with the collection.

use cardbridge_common::{CardId, DeckId, NoteId, NoteTypeId};
use serde::{Deserialize, Serialize};

/// Tag that marks a note.
pub const MARKED_TAG: &str = "marked";

/// Card flag colour. Code 0 means no flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Flag {
    #[default]
    None,
    Red,
    Orange,
    Green,
    Blue,
    Pink,
    Turquoise,
    Purple,
}

impl Flag {
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => Flag::None,
            1 => Flag::Red,
            2 => Flag::Orange,
            3 => Flag::Green,
            4 => Flag::Blue,
            5 => Flag::Pink,
            6 => Flag::Turquoise,
            7 => Flag::Purple,
            _ => return None,
        })
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// The flag after toggling `requested`: asking for the current flag
    /// clears it, anything else replaces it.
    pub fn toggled(self, requested: Flag) -> Flag {
        if self == requested {
            Flag::None
        } else {
            requested
        }
    }
}

impl TryFrom<u8> for Flag {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Flag::from_code(code.into()).ok_or_else(|| format!("invalid flag code {code}"))
    }
}

impl From<Flag> for u8 {
    fn from(flag: Flag) -> Self {
        flag.code()
    }
}

/// Answer button pressed for a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Rating {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Rating::Again),
            2 => Some(Rating::Hard),
            3 => Some(Rating::Good),
            4 => Some(Rating::Easy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub note_id: NoteId,
    pub deck_id: DeckId,
    /// Home deck while the card sits in a filtered deck, else 0.
    #[serde(default)]
    pub original_deck_id: DeckId,
    #[serde(default)]
    pub flag: Flag,
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub lapses: u32,
    /// Days; negative values are learning delays in seconds.
    #[serde(default)]
    pub interval: i32,
    /// Ease in permille (2500 = 250%).
    #[serde(default)]
    pub ease_factor: u32,
    #[serde(default)]
    pub modified: i64,
    /// 0 new, 1 learning, 2 review, 3 relearning.
    #[serde(default)]
    pub card_type: i32,
    /// -3 user buried, -2 sched buried, -1 suspended, 0 new, 1 learn,
    /// 2 review, 3 day learn.
    #[serde(default)]
    pub queue: i32,
    #[serde(default)]
    pub due: i64,
    #[serde(default)]
    pub original_due: i64,
}

impl Card {
    pub fn new(id: CardId, note_id: NoteId, deck_id: DeckId) -> Self {
        Self {
            id,
            note_id,
            deck_id,
            original_deck_id: DeckId(0),
            flag: Flag::None,
            reps: 0,
            lapses: 0,
            interval: 0,
            ease_factor: 0,
            modified: 0,
            card_type: 0,
            queue: 0,
            due: 0,
            original_due: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub note_type_id: NoteTypeId,
    #[serde(default)]
    pub card_ids: Vec<CardId>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    pub fn is_marked(&self) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(MARKED_TAG))
    }

    /// Tags with the marked tag flipped.
    pub fn tags_with_mark_toggled(&self) -> Vec<String> {
        if self.is_marked() {
            self.tags
                .iter()
                .filter(|t| !t.eq_ignore_ascii_case(MARKED_TAG))
                .cloned()
                .collect()
        } else {
            let mut tags = self.tags.clone();
            tags.push(MARKED_TAG.to_string());
            tags
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    #[serde(default)]
    pub is_filtered: bool,
}

/// Cards due today, by queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueCounts {
    pub new: u32,
    pub learning: u32,
    pub review: u32,
}

/// A mutating collection operation. Each runs as one undoable step.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionOp {
    BuryCards(Vec<CardId>),
    SuspendCards(Vec<CardId>),
    ResetProgress(Vec<CardId>),
    SetFlag { cards: Vec<CardId>, flag: Flag },
    SetNoteTags { note: NoteId, tags: Vec<String> },
    BuryNote(NoteId),
    SuspendNote(NoteId),
    AnswerCard { card: CardId, rating: Rating },
}

impl CollectionOp {
    /// Name shown for the operation in the undo menu.
    pub fn undo_label(&self) -> &'static str {
        match self {
            CollectionOp::BuryCards(_) | CollectionOp::BuryNote(_) => "Bury",
            CollectionOp::SuspendCards(_) | CollectionOp::SuspendNote(_) => "Suspend",
            CollectionOp::ResetProgress(_) => "Reset Progress",
            CollectionOp::SetFlag { .. } => "Set Flag",
            CollectionOp::SetNoteTags { .. } => "Update Tags",
            CollectionOp::AnswerCard { .. } => "Answer Card",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_codes_round_trip() {
        for code in 0..=7 {
            let flag = Flag::from_code(code).unwrap();
            assert_eq!(i64::from(flag.code()), code);
        }
        assert_eq!(Flag::from_code(8), None);
        assert_eq!(Flag::from_code(-1), None);
    }

    #[test]
    fn toggling_same_flag_clears_it() {
        assert_eq!(Flag::Red.toggled(Flag::Red), Flag::None);
        assert_eq!(Flag::Red.toggled(Flag::Blue), Flag::Blue);
        assert_eq!(Flag::None.toggled(Flag::Green), Flag::Green);
        assert_eq!(Flag::None.toggled(Flag::None), Flag::None);
    }

    #[test]
    fn flag_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Flag::Purple).unwrap(), "7");
        let flag: Flag = serde_json::from_str("3").unwrap();
        assert_eq!(flag, Flag::Green);
        assert!(serde_json::from_str::<Flag>("9").is_err());
    }

    #[test]
    fn rating_bounds() {
        assert_eq!(Rating::from_code(1), Some(Rating::Again));
        assert_eq!(Rating::from_code(4), Some(Rating::Easy));
        assert_eq!(Rating::from_code(0), None);
        assert_eq!(Rating::from_code(5), None);
    }

    #[test]
    fn mark_toggle_is_case_insensitive() {
        let note = Note {
            id: NoteId(1),
            note_type_id: NoteTypeId(1),
            card_ids: vec![],
            tags: vec!["vocab".into(), "Marked".into()],
        };
        assert!(note.is_marked());
        assert_eq!(note.tags_with_mark_toggled(), vec!["vocab".to_string()]);

        let unmarked = Note {
            tags: vec!["vocab".into()],
            ..note
        };
        assert!(!unmarked.is_marked());
        assert_eq!(
            unmarked.tags_with_mark_toggled(),
            vec!["vocab".to_string(), "marked".to_string()]
        );
    }

    #[test]
    fn card_deserializes_with_defaults() {
        let card: Card = serde_json::from_str(r#"{"id": 10, "note_id": 20, "deck_id": 1}"#).unwrap();
        assert_eq!(card, Card::new(CardId(10), NoteId(20), DeckId(1)));
    }
}
