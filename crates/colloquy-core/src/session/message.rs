//! Turn types for the active transcript.
//!
//! A transcript is an ordered sequence of turns in insertion order. Strict
//! user/assistant alternation is not enforced by the model.

use serde::{Deserialize, Serialize};

/// Author of a turn in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Turn typed by the user.
    User,
    /// Reply from the assistant (including in-transcript error messages).
    Assistant,
}

/// A single message in a conversation transcript.
///
/// Turns are immutable once created; editing a user turn discards it and
/// derives a fresh one through resend rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// The author of the turn.
    pub role: Role,
    /// The content of the turn.
    pub content: String,
    /// Timestamp when the turn was created (RFC 3339).
    pub timestamp: String,
    /// The content as originally typed, captured before any edit replaces it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
}

impl Turn {
    /// Creates a user turn timestamped now.
    pub fn user(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            role: Role::User,
            original_content: Some(content.clone()),
            content,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates an assistant turn timestamped now.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            original_content: None,
        }
    }

    /// Builds a turn with an explicit timestamp. Used when reconstructing
    /// turns from the backend history, which reports no creation times.
    pub fn with_timestamp(
        role: Role,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: timestamp.into(),
            original_content: None,
        }
    }
}
