//! In-memory [`Collection`] for tests and the CLI demo.
//!
//! Every [`CollectionOp`] validates all the entities it touches before
//! changing anything, then records a snapshot of them so the step can be
//! undone.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use cardbridge_common::{BridgeError, CardId, DeckId, NoteId, NoteTypeId};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::backend::Collection;
use crate::error::BackendError;
use crate::model::{Card, CollectionOp, Deck, Flag, Note, QueueCounts, Rating};

const QUEUE_USER_BURIED: i32 = -3;
const QUEUE_SUSPENDED: i32 = -1;
const QUEUE_NEW: i32 = 0;
const QUEUE_REVIEW: i32 = 2;
const TYPE_NEW: i32 = 0;
const TYPE_REVIEW: i32 = 2;
const DEFAULT_EASE: u32 = 2500;

/// Serializable contents of a [`MemoryCollection`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    #[serde(default)]
    pub decks: Vec<Deck>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

struct UndoStep {
    label: &'static str,
    cards: Vec<Card>,
    notes: Vec<Note>,
}

#[derive(Default)]
struct State {
    cards: BTreeMap<CardId, Card>,
    notes: BTreeMap<NoteId, Note>,
    decks: BTreeMap<DeckId, Deck>,
    undo: Vec<UndoStep>,
    clock: i64,
}

#[derive(Default)]
pub struct MemoryCollection {
    state: Mutex<State>,
    simulate_failure: AtomicBool,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: CollectionSnapshot) -> Self {
        let state = State {
            cards: snapshot.cards.into_iter().map(|c| (c.id, c)).collect(),
            notes: snapshot.notes.into_iter().map(|n| (n.id, n)).collect(),
            decks: snapshot.decks.into_iter().map(|d| (d.id, d)).collect(),
            ..Default::default()
        };
        Self {
            state: Mutex::new(state),
            simulate_failure: AtomicBool::new(false),
        }
    }

    /// Load a collection from a JSON [`CollectionSnapshot`] file.
    pub fn from_json_file(path: &Path) -> Result<Self, BridgeError> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: CollectionSnapshot = serde_json::from_str(&content)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// A small two-note collection used by the CLI.
    pub fn demo() -> Self {
        let deck = Deck {
            id: DeckId(1),
            name: "Spanish::Verbs".into(),
            is_filtered: false,
        };
        let notes = vec![
            Note {
                id: NoteId(1_700_000_000_100),
                note_type_id: NoteTypeId(1),
                card_ids: vec![CardId(1_700_000_000_101), CardId(1_700_000_000_102)],
                tags: vec!["verbs".into()],
            },
            Note {
                id: NoteId(1_700_000_000_200),
                note_type_id: NoteTypeId(1),
                card_ids: vec![CardId(1_700_000_000_201)],
                tags: vec!["verbs".into(), "marked".into()],
            },
        ];
        let mut cards = Vec::new();
        for (i, note) in notes.iter().enumerate() {
            for card_id in &note.card_ids {
                let mut card = Card::new(*card_id, note.id, deck.id);
                if i == 1 {
                    card.card_type = TYPE_REVIEW;
                    card.queue = QUEUE_REVIEW;
                    card.interval = 3;
                    card.ease_factor = DEFAULT_EASE;
                    card.reps = 4;
                    card.due = 10;
                }
                cards.push(card);
            }
        }
        Self::from_snapshot(CollectionSnapshot {
            decks: vec![deck],
            notes,
            cards,
        })
    }

    /// Make every following operation fail (for error-path tests).
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// First card still in an active queue, by queue then due.
    pub async fn first_queued_card(&self) -> Option<CardId> {
        let state = self.state.lock().await;
        state
            .cards
            .values()
            .filter(|c| c.queue >= QUEUE_NEW)
            .min_by_key(|c| (c.queue, c.due, c.id))
            .map(|c| c.id)
    }

    /// Undo the most recent operation, returning its label.
    pub async fn undo(&self) -> Option<&'static str> {
        let mut state = self.state.lock().await;
        let step = state.undo.pop()?;
        for card in step.cards {
            state.cards.insert(card.id, card);
        }
        for note in step.notes {
            state.notes.insert(note.id, note);
        }
        Some(step.label)
    }

    pub async fn flag_of(&self, id: CardId) -> Option<Flag> {
        self.state.lock().await.cards.get(&id).map(|c| c.flag)
    }

    pub async fn undo_depth(&self) -> usize {
        self.state.lock().await.undo.len()
    }

    pub async fn snapshot(&self) -> CollectionSnapshot {
        let state = self.state.lock().await;
        CollectionSnapshot {
            decks: state.decks.values().cloned().collect(),
            notes: state.notes.values().cloned().collect(),
            cards: state.cards.values().cloned().collect(),
        }
    }
}

impl State {
    fn card(&self, id: CardId) -> Result<&Card, BackendError> {
        self.cards.get(&id).ok_or(BackendError::NotFound {
            kind: "card",
            id: id.get(),
        })
    }

    fn note(&self, id: NoteId) -> Result<&Note, BackendError> {
        self.notes.get(&id).ok_or(BackendError::NotFound {
            kind: "note",
            id: id.get(),
        })
    }

    fn note_cards(&self, id: NoteId) -> Result<Vec<CardId>, BackendError> {
        let note = self.note(id)?;
        for card in &note.card_ids {
            self.card(*card)?;
        }
        Ok(note.card_ids.clone())
    }

    /// Apply `update` to every card in `ids`, all or nothing.
    fn update_cards(
        &mut self,
        label: &'static str,
        ids: &[CardId],
        mut update: impl FnMut(&mut Card),
    ) -> Result<(), BackendError> {
        let before = ids
            .iter()
            .map(|id| self.card(*id).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        self.clock = self.clock.saturating_add(1);
        let modified = self.clock;
        for id in ids {
            if let Some(card) = self.cards.get_mut(id) {
                update(card);
                card.modified = modified;
            }
        }
        self.undo.push(UndoStep {
            label,
            cards: before,
            notes: Vec::new(),
        });
        Ok(())
    }

    fn set_note_tags(&mut self, id: NoteId, tags: Vec<String>) -> Result<(), BackendError> {
        let before = self.note(id)?.clone();
        if let Some(note) = self.notes.get_mut(&id) {
            note.tags = tags;
        }
        self.undo.push(UndoStep {
            label: "Update Tags",
            cards: Vec::new(),
            notes: vec![before],
        });
        Ok(())
    }
}

/// Days until the next review for `rating`; `None` means a relearning step.
fn next_interval_days(card: &Card, rating: Rating) -> Option<u32> {
    let current = card.interval.max(0) as f64;
    let ease = if card.ease_factor == 0 {
        DEFAULT_EASE
    } else {
        card.ease_factor
    } as f64
        / 1000.0;
    let days = match rating {
        Rating::Again => return None,
        Rating::Hard => current * 1.2,
        Rating::Good => current * ease,
        Rating::Easy => current * ease * 1.3,
    };
    let minimum = if rating == Rating::Easy { 4 } else { 1 };
    Some((days.round() as u32).max(minimum))
}

fn interval_label(days: Option<u32>) -> String {
    match days {
        None => "10m".to_string(),
        Some(d) if d < 30 => format!("{d}d"),
        Some(d) if d < 365 => format!("{}mo", d / 30),
        Some(d) => format!("{}y", d / 365),
    }
}

#[async_trait]
impl Collection for MemoryCollection {
    async fn card(&self, id: CardId) -> Result<Card, BackendError> {
        self.state.lock().await.card(id).cloned()
    }

    async fn note(&self, id: NoteId) -> Result<Note, BackendError> {
        self.state.lock().await.note(id).cloned()
    }

    async fn deck(&self, id: DeckId) -> Result<Deck, BackendError> {
        self.state
            .lock()
            .await
            .decks
            .get(&id)
            .cloned()
            .ok_or(BackendError::NotFound {
                kind: "deck",
                id: id.get(),
            })
    }

    async fn queue_counts(&self) -> Result<QueueCounts, BackendError> {
        let state = self.state.lock().await;
        let mut counts = QueueCounts::default();
        for card in state.cards.values() {
            match card.queue {
                0 => counts.new += 1,
                1 | 3 => counts.learning += 1,
                2 => counts.review += 1,
                _ => {}
            }
        }
        Ok(counts)
    }

    async fn next_interval_label(
        &self,
        card: CardId,
        rating: Rating,
    ) -> Result<String, BackendError> {
        let state = self.state.lock().await;
        let card = state.card(card)?;
        Ok(interval_label(next_interval_days(card, rating)))
    }

    async fn run_undoable(&self, op: CollectionOp) -> Result<(), BackendError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(BackendError::Failed("simulated collection failure".into()));
        }

        let label = op.undo_label();
        let mut state = self.state.lock().await;
        match op {
            CollectionOp::BuryCards(ids) => {
                state.update_cards(label, &ids, |c| c.queue = QUEUE_USER_BURIED)
            }
            CollectionOp::SuspendCards(ids) => {
                state.update_cards(label, &ids, |c| c.queue = QUEUE_SUSPENDED)
            }
            CollectionOp::BuryNote(note) => {
                let ids = state.note_cards(note)?;
                state.update_cards(label, &ids, |c| c.queue = QUEUE_USER_BURIED)
            }
            CollectionOp::SuspendNote(note) => {
                let ids = state.note_cards(note)?;
                state.update_cards(label, &ids, |c| c.queue = QUEUE_SUSPENDED)
            }
            CollectionOp::ResetProgress(ids) => state.update_cards(label, &ids, |c| {
                c.card_type = TYPE_NEW;
                c.queue = QUEUE_NEW;
                c.interval = 0;
                c.ease_factor = 0;
                c.reps = 0;
                c.lapses = 0;
                c.due = 0;
            }),
            CollectionOp::SetFlag { cards, flag } => {
                state.update_cards(label, &cards, |c| c.flag = flag)
            }
            CollectionOp::SetNoteTags { note, tags } => state.set_note_tags(note, tags),
            CollectionOp::AnswerCard { card, rating } => {
                state.update_cards(label, &[card], |c| {
                    c.reps = c.reps.saturating_add(1);
                    match next_interval_days(c, rating) {
                        None => {
                            if c.card_type == TYPE_REVIEW {
                                c.lapses = c.lapses.saturating_add(1);
                            }
                            c.queue = 1;
                            c.card_type = if c.card_type == TYPE_NEW { 1 } else { 3 };
                        }
                        Some(days) => {
                            c.interval = i32::try_from(days).unwrap_or(i32::MAX);
                            c.due = c.due.saturating_add(i64::from(days));
                            c.card_type = TYPE_REVIEW;
                            c.queue = QUEUE_REVIEW;
                            if c.ease_factor == 0 {
                                c.ease_factor = DEFAULT_EASE;
                            }
                        }
                    }
                })
            }
        }
    }
}
