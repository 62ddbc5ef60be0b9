//! Session domain model.
//!
//! A session is a named, persisted snapshot of a transcript, addressable and
//! resumable later from the saved-session list.

use super::message::{Role, Turn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of saved sessions kept per identity. The oldest entry is
/// evicted when the collection overflows.
pub const SESSION_CAP: usize = 20;

/// Number of characters of the opening user message used for the title.
pub const TITLE_MAX_CHARS: usize = 30;

/// A saved conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (time-ordered UUID).
    pub id: String,
    /// Display title derived from the first user message.
    pub title: String,
    /// Full transcript at the time of the last record.
    pub messages: Vec<Turn>,
}

impl Session {
    /// Creates a session for a freshly opened conversation.
    ///
    /// UUIDv7 ids are time-derived and monotonic, so two sessions opened
    /// within the same millisecond still get distinct ids.
    pub fn open(messages: Vec<Turn>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: derive_title(&messages),
            messages,
        }
    }
}

/// Derives a display title from the first user turn: the opening characters
/// followed by an ellipsis.
pub fn derive_title(messages: &[Turn]) -> String {
    let opening = messages
        .iter()
        .find(|turn| turn.role == Role::User)
        .map(|turn| turn.content.as_str())
        .unwrap_or("Conversation");

    let mut title: String = opening.chars().take(TITLE_MAX_CHARS).collect();
    title.push_str("...");
    title
}
