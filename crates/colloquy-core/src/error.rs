//! Error types for the Colloquy client.

use thiserror::Error;

/// A shared error type for the Colloquy client engine.
///
/// Every variant is recoverable: the engine degrades to a smaller but
/// still-usable state instead of surfacing errors to the view layer.
#[derive(Error, Debug, Clone)]
pub enum ColloquyError {
    /// The backend could not be reached (connection, DNS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("backend error ({status}): {detail}")]
    Backend { status: u16, detail: String },

    /// Local key-value storage failed (unavailable, unreadable).
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl ColloquyError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Backend error
    pub fn backend(status: u16, detail: impl Into<String>) -> Self {
        Self::Backend {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Check if this error came from the backend rejecting a request
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }
}

impl From<std::io::Error> for ColloquyError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for ColloquyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for ColloquyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// A type alias for `Result<T, ColloquyError>`.
pub type Result<T> = std::result::Result<T, ColloquyError>;
