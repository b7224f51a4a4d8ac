//! Collaborators the dispatcher drives.
//!
//! The collection owns its own transaction and undo discipline; the
//! dispatcher only ever asks it for one read or one [`CollectionOp`] per
//! request.

use async_trait::async_trait;
use cardbridge_common::{CardId, DeckId, NoteId};

use crate::error::BackendError;
use crate::model::{Card, CollectionOp, Deck, Note, QueueCounts, Rating};

#[async_trait]
pub trait Collection: Send + Sync {
    async fn card(&self, id: CardId) -> Result<Card, BackendError>;

    async fn note(&self, id: NoteId) -> Result<Note, BackendError>;

    async fn deck(&self, id: DeckId) -> Result<Deck, BackendError>;

    async fn queue_counts(&self) -> Result<QueueCounts, BackendError>;

    /// Human-readable interval the card would get for `rating`, e.g. `"4d"`.
    async fn next_interval_label(&self, card: CardId, rating: Rating)
        -> Result<String, BackendError>;

    /// Apply `op` atomically as a single undoable step.
    async fn run_undoable(&self, op: CollectionOp) -> Result<(), BackendError>;
}

/// Reviewer state owned by the UI host.
pub trait ReviewerHost: Send + Sync {
    /// The card currently presented by the study queue.
    fn top_card(&self) -> Option<CardId>;

    fn is_showing_answer(&self) -> bool;

    fn is_system_in_dark_mode(&self) -> bool;

    fn is_network_metered(&self) -> bool;
}

/// How a new utterance interacts with one already playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueMode {
    /// Drop anything queued and speak now.
    #[default]
    Flush,
    Add,
}

impl QueueMode {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(QueueMode::Flush),
            1 => Some(QueueMode::Add),
            _ => None,
        }
    }
}

/// Text-to-speech engine.
pub trait Speech: Send + Sync {
    fn speak(&self, text: &str, mode: QueueMode) -> Result<(), BackendError>;

    /// Returns `false` if the language is not available.
    fn set_language(&self, language: &str) -> bool;

    fn set_pitch(&self, pitch: f32) -> Result<(), BackendError>;

    fn set_speech_rate(&self, rate: f32) -> Result<(), BackendError>;

    fn is_speaking(&self) -> bool;

    fn stop(&self) -> Result<(), BackendError>;
}
