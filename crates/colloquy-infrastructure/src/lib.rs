//! Storage adapters for the Colloquy chat client.
//!
//! Provides the file-backed implementation of the local history cache and
//! the credential accessor layered on top of it.

pub mod credentials;
pub mod file_history_cache;
pub mod paths;

pub use crate::credentials::StoredCredentials;
pub use crate::file_history_cache::FileHistoryCache;
