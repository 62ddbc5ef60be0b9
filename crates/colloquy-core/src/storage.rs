//! Local history cache trait.
//!
//! Defines the interface to the persisted per-profile key-value store that
//! survives reloads: saved session collections keyed by identity, plus the
//! credential entries.

use crate::error::Result;
use async_trait::async_trait;

/// Storage key holding the bearer credential.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key holding the refresh credential.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Cache key under which a user's saved session collection is stored.
pub fn history_key(email: &str) -> String {
    format!("chat_history_{email}")
}

/// A persisted key-value store scoped to one client profile.
///
/// Values are opaque strings; callers own the serialization. Implementations
/// report failures instead of panicking; the engine treats any failure as an
/// absent entry so the chat stays usable with no history at all.
#[async_trait]
pub trait HistoryCache: Send + Sync {
    /// Returns the stored value for `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes the entry for `key`. Deleting an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_key_is_scoped_by_email() {
        assert_eq!(history_key("a@b.c"), "chat_history_a@b.c");
    }
}
