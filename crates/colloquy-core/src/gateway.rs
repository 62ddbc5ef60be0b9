//! Remote history gateway trait.
//!
//! The backend is an external collaborator reached over HTTP; this trait is
//! the seam the engine talks through so tests can substitute it wholesale.

use crate::error::Result;
use crate::identity::Identity;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One stored exchange returned by the history endpoint, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// What the user sent.
    pub input_text: String,
    /// What the assistant answered.
    pub output_text: String,
}

/// The remote backend the engine talks to.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Resolves the identity behind a bearer token (`GET /me`).
    ///
    /// Any failure here means the engine continues in guest mode.
    async fn me(&self, token: &str) -> Result<Identity>;

    /// Fetches the canonical turn history, oldest first (`GET /history`).
    async fn history(&self, token: &str) -> Result<Vec<HistoryEntry>>;

    /// Submits a user message and returns the assistant reply (`POST /ask`).
    ///
    /// The bearer token is optional; the endpoint also serves guests.
    async fn ask(&self, message: &str, system_prompt: &str, token: Option<&str>)
    -> Result<String>;
}
