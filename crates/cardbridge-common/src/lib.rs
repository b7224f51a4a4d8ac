pub mod errors;
pub mod id;

pub use errors::{BridgeError, ConfigError};
pub use id::{new_correlation_id, CardId, DeckId, NoteId, NoteTypeId};

pub type Result<T> = std::result::Result<T, BridgeError>;
