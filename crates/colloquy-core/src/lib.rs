//! Domain layer for the Colloquy chat client.
//!
//! This crate holds the data model (turns, sessions, identities), the shared
//! error type, and the trait seams the engine is wired through: the remote
//! backend (`ChatGateway`), the persisted key-value cache (`HistoryCache`)
//! and the credential accessor (`CredentialStore`). It performs no I/O.

pub mod error;
pub mod gateway;
pub mod identity;
pub mod session;
pub mod storage;

pub use error::{ColloquyError, Result};
pub use identity::Identity;
pub use session::{Role, Session, Turn};
