//! Credential accessor backed by the shared key-value cache.
//!
//! Tokens live in the same store as chat history, mirroring the single
//! per-profile storage of the browser client.

use async_trait::async_trait;
use colloquy_core::error::Result;
use colloquy_core::identity::CredentialStore;
use colloquy_core::storage::{ACCESS_TOKEN_KEY, HistoryCache, REFRESH_TOKEN_KEY};
use std::sync::Arc;
use tracing::warn;

/// Reads bearer credentials from the history cache.
pub struct StoredCredentials<C: HistoryCache> {
    store: Arc<C>,
}

impl<C: HistoryCache> StoredCredentials<C> {
    pub fn new(store: Arc<C>) -> Self {
        Self { store }
    }

    /// Writes both tokens. Exposed for the login flow, which lives outside
    /// the engine; the engine itself only ever reads and clears.
    pub async fn store_tokens(&self, access: &str, refresh: Option<&str>) -> Result<()> {
        self.store.set(ACCESS_TOKEN_KEY, access).await?;
        if let Some(refresh) = refresh {
            self.store.set(REFRESH_TOKEN_KEY, refresh).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<C: HistoryCache> CredentialStore for StoredCredentials<C> {
    async fn access_token(&self) -> Option<String> {
        match self.store.get(ACCESS_TOKEN_KEY).await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "credential read failed, treating as absent");
                None
            }
        }
    }

    async fn clear(&self) -> Result<()> {
        self.store.remove(ACCESS_TOKEN_KEY).await?;
        self.store.remove(REFRESH_TOKEN_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_history_cache::FileHistoryCache;
    use colloquy_core::storage::history_key;

    #[tokio::test]
    async fn stored_token_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Arc::new(FileHistoryCache::new(dir.path()));
        let credentials = StoredCredentials::new(cache);

        credentials.store_tokens("abc", Some("def")).await.unwrap();

        assert_eq!(credentials.access_token().await.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn missing_token_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Arc::new(FileHistoryCache::new(dir.path()));
        let credentials = StoredCredentials::new(cache);

        assert_eq!(credentials.access_token().await, None);
    }

    #[tokio::test]
    async fn unreadable_store_reads_as_no_token() {
        struct BrokenCache;

        #[async_trait]
        impl HistoryCache for BrokenCache {
            async fn get(&self, _key: &str) -> Result<Option<String>> {
                Err(colloquy_core::ColloquyError::storage("store offline"))
            }

            async fn set(&self, _key: &str, _value: &str) -> Result<()> {
                Err(colloquy_core::ColloquyError::storage("store offline"))
            }

            async fn remove(&self, _key: &str) -> Result<()> {
                Err(colloquy_core::ColloquyError::storage("store offline"))
            }
        }

        let credentials = StoredCredentials::new(Arc::new(BrokenCache));
        assert_eq!(credentials.access_token().await, None);
    }

    #[tokio::test]
    async fn clear_removes_both_tokens_but_not_history() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Arc::new(FileHistoryCache::new(dir.path()));
        cache.set(&history_key("a@b.c"), "[]").await.unwrap();

        let credentials = StoredCredentials::new(cache.clone());
        credentials.store_tokens("abc", Some("def")).await.unwrap();
        credentials.clear().await.unwrap();

        assert_eq!(credentials.access_token().await, None);
        assert_eq!(cache.get(REFRESH_TOKEN_KEY).await.unwrap(), None);
        // sign-out never touches persisted history
        assert_eq!(cache.get(&history_key("a@b.c")).await.unwrap().as_deref(), Some("[]"));
    }
}
