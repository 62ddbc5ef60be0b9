//! ConversationController - the send / edit / resend state machine.
//!
//! Owns the active transcript and drives the exchange cycle: optimistic
//! user-turn append, remote ask, reply (or error turn) append, then a
//! session record. A `sending` flag makes submission mutually exclusive;
//! while a request is in flight every further submit is a no-op.

use crate::session_store::SessionStore;
use colloquy_core::gateway::ChatGateway;
use colloquy_core::session::{Role, Turn};
use colloquy_core::storage::HistoryCache;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// System prompt used when no quick action overrides it.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Assistant-turn text shown when the backend cannot be reached.
pub const BACKEND_UNREACHABLE: &str = "Error: Backend unreachable. Please start the server.";

#[derive(Default)]
struct ConversationState {
    transcript: Vec<Turn>,
    sending: bool,
    editing: Option<usize>,
}

/// Drives the active conversation against the remote gateway and records
/// completed exchanges into the session store.
pub struct ConversationController<G: ChatGateway, C: HistoryCache> {
    gateway: Arc<G>,
    store: Arc<RwLock<SessionStore<C>>>,
    state: Arc<RwLock<ConversationState>>,
    bearer: RwLock<Option<String>>,
}

impl<G: ChatGateway, C: HistoryCache> ConversationController<G, C> {
    pub fn new(gateway: Arc<G>, store: Arc<RwLock<SessionStore<C>>>) -> Self {
        Self {
            gateway,
            store,
            state: Arc::new(RwLock::new(ConversationState::default())),
            bearer: RwLock::new(None),
        }
    }

    /// Sets (or clears) the bearer token attached to outgoing asks.
    pub async fn set_bearer(&self, token: Option<String>) {
        *self.bearer.write().await = token;
    }

    /// A copy of the active transcript, oldest turn first.
    pub async fn transcript(&self) -> Vec<Turn> {
        self.state.read().await.transcript.clone()
    }

    /// Whether a request is currently in flight.
    pub async fn is_sending(&self) -> bool {
        self.state.read().await.sending
    }

    /// The index of the user turn being edited, if any.
    pub async fn editing(&self) -> Option<usize> {
        self.state.read().await.editing
    }

    /// Submits a user message with the default system prompt.
    pub async fn submit(&self, text: &str) {
        self.submit_with_prompt(text, DEFAULT_SYSTEM_PROMPT).await;
    }

    /// Submits a user message under an explicit system prompt.
    ///
    /// Blank input and submissions while a request is in flight are no-ops.
    /// The user turn is appended before the request goes out; on failure an
    /// assistant error turn is appended instead of rolling the user turn
    /// back, and the exchange is still recorded.
    pub async fn submit_with_prompt(&self, text: &str, system_prompt: &str) {
        if text.trim().is_empty() {
            return;
        }

        // Snapshot taken at call time; the reply is appended relative to it
        // so a late response always lands right after its user turn.
        let snapshot = {
            let mut state = self.state.write().await;
            if state.sending {
                debug!("submit ignored, a request is already in flight");
                return;
            }
            state.sending = true;
            state.transcript.push(Turn::user(text));
            state.transcript.clone()
        };

        let bearer = self.bearer.read().await.clone();
        let reply = match self
            .gateway
            .ask(text, system_prompt, bearer.as_deref())
            .await
        {
            Ok(content) => Turn::assistant(content),
            Err(err) => {
                warn!(error = %err, "ask failed, appending error turn");
                Turn::assistant(BACKEND_UNREACHABLE)
            }
        };

        let transcript = {
            let mut state = self.state.write().await;
            let mut transcript = snapshot;
            transcript.push(reply);
            state.transcript = transcript.clone();
            state.sending = false;
            transcript
        };

        self.store.write().await.record_turn(transcript).await;
    }

    /// Enters edit mode for the user turn at `index`.
    ///
    /// Only user turns are editable; anything else leaves the state alone.
    pub async fn begin_edit(&self, index: usize) {
        let mut state = self.state.write().await;
        let is_user_turn = state
            .transcript
            .get(index)
            .is_some_and(|turn| turn.role == Role::User);
        if is_user_turn {
            state.editing = Some(index);
        }
    }

    /// Leaves edit mode without changing the transcript.
    pub async fn cancel_edit(&self) {
        self.state.write().await.editing = None;
    }

    /// Replaces the turn at `index` and everything after it with a fresh
    /// submission of `new_text`.
    ///
    /// A stale index (the transcript shrank since edit mode began) only
    /// clears edit mode. While a request is in flight nothing changes.
    pub async fn resend(&self, index: usize, new_text: &str) {
        {
            let mut state = self.state.write().await;
            if state.sending {
                return;
            }
            if index >= state.transcript.len() {
                state.editing = None;
                return;
            }
            state.transcript.truncate(index);
            state.editing = None;
        }

        self.submit(new_text).await;
    }

    /// Clears the transcript and edit state for a new conversation.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.transcript.clear();
        state.editing = None;
    }

    /// Replaces the transcript with a stored session's messages.
    pub async fn load_transcript(&self, transcript: Vec<Turn>) {
        let mut state = self.state.write().await;
        state.transcript = transcript;
        state.editing = None;
    }
}
