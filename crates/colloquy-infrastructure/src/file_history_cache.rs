//! File-backed implementation of the local history cache.
//!
//! One file per key under the data directory, mirroring the per-profile
//! key-value storage of a browser:
//!
//! ```text
//! base_dir/
//! ├── chat_history_user@example.com.json
//! ├── access_token.json
//! └── refresh_token.json
//! ```

use async_trait::async_trait;
use colloquy_core::error::{ColloquyError, Result};
use colloquy_core::storage::HistoryCache;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Key-value store persisting each entry as its own file.
pub struct FileHistoryCache {
    base_dir: PathBuf,
}

impl FileHistoryCache {
    /// Creates a cache rooted at `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Creates a cache at the default platform location.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be determined.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(crate::paths::default_data_dir()?))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        // Keys come from a fixed set plus an email; replace path separators
        // so a hostile email cannot escape the cache directory.
        let safe: String = key
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '_',
                other => other,
            })
            .collect();
        self.base_dir.join(format!("{safe}.json"))
    }
}

#[async_trait]
impl HistoryCache for FileHistoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.entry_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ColloquyError::storage(format!("read '{key}': {err}"))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|err| ColloquyError::storage(format!("create cache dir: {err}")))?;
        fs::write(self.entry_path(key), value)
            .await
            .map_err(|err| ColloquyError::storage(format!("write '{key}': {err}")))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ColloquyError::storage(format!("remove '{key}': {err}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileHistoryCache::new(dir.path());

        cache.set("chat_history_a@b.c", "[1,2,3]").await.unwrap();
        let value = cache.get("chat_history_a@b.c").await.unwrap();

        assert_eq!(value.as_deref(), Some("[1,2,3]"));
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileHistoryCache::new(dir.path());

        assert_eq!(cache.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileHistoryCache::new(dir.path());

        cache.set("access_token", "tok").await.unwrap();
        cache.remove("access_token").await.unwrap();
        cache.remove("access_token").await.unwrap();

        assert_eq!(cache.get("access_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn keys_with_separators_stay_inside_the_cache_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileHistoryCache::new(dir.path());

        cache.set("chat_history_../evil", "x").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(cache.get("chat_history_../evil").await.unwrap().as_deref(), Some("x"));
    }
}
