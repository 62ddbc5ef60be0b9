//! ChatUsecase - the facade the view layer dispatches intents into.
//!
//! Wires the gateway, credential store, session store and conversation
//! controller together, and owns the mount flow: resolve the stored
//! credential into an identity, hydrate the saved-session collection, and
//! fall back to guest mode when anything along the way fails.

use crate::conversation::ConversationController;
use crate::quick_action::QuickAction;
use crate::session_store::SessionStore;
use colloquy_core::gateway::ChatGateway;
use colloquy_core::identity::{CredentialStore, Identity};
use colloquy_core::session::Session;
use colloquy_core::storage::HistoryCache;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Entry point tying the engine together for a single client instance.
pub struct ChatUsecase<G: ChatGateway, C: HistoryCache, S: CredentialStore> {
    gateway: Arc<G>,
    credentials: Arc<S>,
    store: Arc<RwLock<SessionStore<C>>>,
    controller: ConversationController<G, C>,
}

impl<G: ChatGateway, C: HistoryCache, S: CredentialStore> ChatUsecase<G, C, S> {
    /// Builds the engine and runs the mount flow.
    pub async fn mount(gateway: Arc<G>, cache: Arc<C>, credentials: Arc<S>) -> Self {
        let store = Arc::new(RwLock::new(SessionStore::new(cache)));
        let controller = ConversationController::new(gateway.clone(), store.clone());

        let usecase = Self {
            gateway,
            credentials,
            store,
            controller,
        };
        usecase.refresh_identity().await;
        usecase
    }

    /// Resolves the stored credential into an identity and hydrates the
    /// session collection. Any failure leaves the engine in guest mode.
    pub async fn refresh_identity(&self) {
        let Some(token) = self.credentials.access_token().await else {
            debug!("no credential present, running as guest");
            return;
        };

        match self.gateway.me(&token).await {
            Ok(identity) => {
                self.controller.set_bearer(Some(token.clone())).await;
                // Publish the cached view in its own critical section so it
                // is readable while the remote fetch is outstanding; no lock
                // is held across the fetch itself.
                self.store.write().await.load_cached_view(identity).await;
                let outcome = self.gateway.history(&token).await;
                self.store.write().await.apply_remote_history(outcome);
            }
            Err(err) => {
                debug!(error = %err, "credential rejected, running as guest");
            }
        }
    }

    pub fn controller(&self) -> &ConversationController<G, C> {
        &self.controller
    }

    /// The resolved identity, if any.
    pub async fn identity(&self) -> Option<Identity> {
        self.store.read().await.identity().cloned()
    }

    /// Saved sessions for display, most recently active first.
    pub async fn sessions(&self) -> Vec<Session> {
        self.store.read().await.sessions().to_vec()
    }

    /// Loads a stored session into the active transcript.
    ///
    /// Returns false when the id is unknown, leaving the transcript as-is.
    pub async fn activate_session(&self, session_id: &str) -> bool {
        let Some(messages) = self.store.write().await.activate(session_id) else {
            return false;
        };
        self.controller.load_transcript(messages).await;
        true
    }

    /// Starts a fresh conversation without touching saved sessions. The
    /// next exchange opens a new session rather than updating the head.
    pub async fn new_conversation(&self) {
        self.controller.reset().await;
        self.store.write().await.detach_head();
    }

    /// Runs a canned prompt under its specialized system prompt.
    pub async fn run_quick_action(&self, action: QuickAction) {
        self.controller
            .submit_with_prompt(action.message(), action.system_prompt())
            .await;
    }

    /// Signs out: clears credentials, the bearer, the active transcript and
    /// the in-memory session collection. Persisted history stays on disk.
    pub async fn sign_out(&self) {
        if let Err(err) = self.credentials.clear().await {
            warn!(error = %err, "failed to clear credentials");
        }
        self.controller.set_bearer(None).await;
        self.controller.reset().await;
        self.store.write().await.clear();
    }
}
