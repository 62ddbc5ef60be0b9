//! Saved-session collection and its reconciliation with local and remote
//! history.
//!
//! The store owns the ordered session list for the current identity,
//! most-recently-active first. It hydrates from the local cache for
//! responsiveness, then lets the canonical remote history overwrite that
//! view; the remote is the source of truth once identity is known. Every
//! failure on the way degrades to a smaller view instead of propagating.

use colloquy_core::error::Result;
use colloquy_core::gateway::HistoryEntry;
use colloquy_core::identity::Identity;
use colloquy_core::session::{Role, SESSION_CAP, Session, Turn, derive_title};
use colloquy_core::storage::{HistoryCache, history_key};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Timestamp attached to turns rebuilt from remote history, which carries no
/// creation times. A fixed value keeps repeat hydrations identical.
const REMOTE_TURN_TIMESTAMP: &str = "1970-01-01T00:00:00+00:00";

/// Ordered collection of saved sessions for the current identity.
///
/// The entry at index 0, once a first turn has been sent in this instance,
/// always mirrors the active transcript. In guest mode (no identity) the
/// collection lives in memory only and nothing is ever written to the cache.
pub struct SessionStore<C: HistoryCache> {
    cache: Arc<C>,
    identity: Option<Identity>,
    sessions: Vec<Session>,
    /// Whether the head session already represents the active conversation.
    /// While attached, recorded exchanges update the head in place; once
    /// detached, the next exchange opens a new session.
    head_attached: bool,
}

impl<C: HistoryCache> SessionStore<C> {
    pub fn new(cache: Arc<C>) -> Self {
        Self {
            cache,
            identity: None,
            sessions: Vec::new(),
            head_attached: false,
        }
    }

    /// The resolved identity, if any. `None` means guest mode.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Saved sessions for display, most recently active first.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Transcript of a stored session, copied for activation.
    ///
    /// Mutating the active transcript afterwards does not touch the stored
    /// entry until the next `record_turn`.
    pub fn messages_of(&self, session_id: &str) -> Option<Vec<Turn>> {
        self.sessions
            .iter()
            .find(|session| session.id == session_id)
            .map(|session| session.messages.clone())
    }

    /// Loads and publishes the cached collection for `identity`.
    ///
    /// This is the fast path of hydration: callers run it in its own short
    /// critical section before issuing the remote fetch, so the cached view
    /// is readable while that fetch is outstanding.
    pub async fn load_cached_view(&mut self, identity: Identity) {
        self.sessions = self.load_cached(&identity.email).await;
        self.head_attached = false;
        self.identity = Some(identity);
    }

    /// Applies the outcome of the remote history fetch.
    ///
    /// On success the remote view replaces the published one wholesale (no
    /// merging), even when empty. On failure the published view is kept
    /// as-is and the miss is only logged; history display staleness never
    /// blocks sending new messages.
    pub fn apply_remote_history(&mut self, outcome: Result<Vec<HistoryEntry>>) {
        let Some(identity) = &self.identity else {
            return;
        };

        match outcome {
            Ok(entries) => {
                self.sessions = Self::reconcile(&identity.email, &entries);
                self.head_attached = false;
            }
            Err(err) => {
                warn!(error = %err, "history fetch failed, keeping cached sessions");
            }
        }
    }

    /// Records a completed exchange.
    ///
    /// While no head session represents the active conversation, a new head
    /// is opened and the collection capped; afterwards every exchange of the
    /// same conversation (including one rebuilt by an edit-and-resend)
    /// replaces the head's transcript in place. The collection is then
    /// persisted, unless running as guest.
    pub async fn record_turn(&mut self, transcript: Vec<Turn>) {
        if transcript.is_empty() {
            return;
        }

        if self.sessions.is_empty() || !self.head_attached {
            self.sessions.insert(0, Session::open(transcript));
            self.sessions.truncate(SESSION_CAP);
            self.head_attached = true;
        } else {
            self.sessions[0].messages = transcript;
        }

        self.persist().await;
    }

    /// Detaches the head session from the active conversation. The next
    /// recorded exchange opens a new session instead of updating the head.
    pub fn detach_head(&mut self) {
        self.head_attached = false;
    }

    /// Marks a stored session as the active conversation and returns a copy
    /// of its transcript. Further exchanges update the head in place.
    pub fn activate(&mut self, session_id: &str) -> Option<Vec<Turn>> {
        let messages = self.messages_of(session_id)?;
        self.head_attached = true;
        Some(messages)
    }

    /// Forgets identity and sessions.
    ///
    /// Persisted history is left untouched; sign-out only clears credentials
    /// and in-memory state.
    pub fn clear(&mut self) {
        self.identity = None;
        self.sessions.clear();
        self.head_attached = false;
    }

    async fn load_cached(&self, email: &str) -> Vec<Session> {
        let key = history_key(email);
        match self.cache.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(sessions) => sessions,
                Err(err) => {
                    warn!(error = %err, "cached history is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "history cache unavailable, starting empty");
                Vec::new()
            }
        }
    }

    /// Builds the reconciled view of remote history: one session holding the
    /// flat alternating transcript. An empty remote history clears the view.
    fn reconcile(email: &str, entries: &[HistoryEntry]) -> Vec<Session> {
        if entries.is_empty() {
            return Vec::new();
        }

        let mut messages = Vec::with_capacity(entries.len() * 2);
        for entry in entries {
            messages.push(Turn::with_timestamp(
                Role::User,
                entry.input_text.as_str(),
                REMOTE_TURN_TIMESTAMP,
            ));
            messages.push(Turn::with_timestamp(
                Role::Assistant,
                entry.output_text.as_str(),
                REMOTE_TURN_TIMESTAMP,
            ));
        }

        // A stable id derived from the email keeps repeat hydrations equal.
        let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_bytes()).to_string();
        let title = derive_title(&messages);

        vec![Session {
            id,
            title,
            messages,
        }]
    }

    async fn persist(&self) {
        // Guest mode: nothing is written.
        let Some(identity) = &self.identity else {
            return;
        };

        let key = history_key(&identity.email);
        match serde_json::to_string(&self.sessions) {
            Ok(payload) => {
                if let Err(err) = self.cache.set(&key, &payload).await {
                    warn!(error = %err, "failed to persist session collection");
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to serialize session collection");
            }
        }
    }
}
