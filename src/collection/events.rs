use serde::{Deserialize, Serialize};

use crate::book::Book;

/// Change notification emitted after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CollectionEvent {
    BookAdded { book: Book },
    BookUpdated { book: Book },
    BookDeleted { id: String },
}

impl CollectionEvent {
    pub const BOOK_ADDED: &'static str = "BookAdded";
    pub const BOOK_UPDATED: &'static str = "BookUpdated";
    pub const BOOK_DELETED: &'static str = "BookDeleted";
    /// Emitted alongside every specific event.
    pub const COLLECTION_CHANGED: &'static str = "CollectionChanged";

    /// The emitter event name for this change.
    pub fn name(&self) -> &'static str {
        match self {
            CollectionEvent::BookAdded { .. } => Self::BOOK_ADDED,
            CollectionEvent::BookUpdated { .. } => Self::BOOK_UPDATED,
            CollectionEvent::BookDeleted { .. } => Self::BOOK_DELETED,
        }
    }

    pub fn book_id(&self) -> &str {
        match self {
            CollectionEvent::BookAdded { book } | CollectionEvent::BookUpdated { book } => &book.id,
            CollectionEvent::BookDeleted { id } => id,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
