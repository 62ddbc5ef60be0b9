//! Identity model and credential accessor trait.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The authenticated user, resolved once per mount via the backend.
///
/// Absence of an identity means **guest mode**: transcripts stay fully
/// ephemeral and nothing is written to the local history cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Account id assigned by the backend.
    pub id: i64,
    /// Display name.
    pub username: String,
    /// Email address; also scopes the local history cache key.
    pub email: String,
}

/// Read access to the persisted bearer credential.
///
/// The engine only reads tokens and clears them on sign-out; acquiring them
/// (login/signup) happens outside this engine.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// The current bearer token, if one is stored.
    async fn access_token(&self) -> Option<String>;

    /// Removes both the access and refresh credentials.
    async fn clear(&self) -> Result<()>;
}
