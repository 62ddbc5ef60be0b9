//! Conversation session domain types.

pub mod message;
pub mod model;

pub use message::{Role, Turn};
pub use model::{SESSION_CAP, Session, TITLE_MAX_CHARS, derive_title};
