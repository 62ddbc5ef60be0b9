//! Application layer for the Colloquy chat client.
//!
//! This crate holds the session/state synchronization engine: the
//! conversation controller (send / edit / resend state machine), the
//! session store (persistence and reconciliation of saved sessions), and
//! the use case facade the view layer dispatches intents into.

pub mod conversation;
pub mod quick_action;
pub mod session_store;
pub mod usecase;

pub use conversation::{BACKEND_UNREACHABLE, ConversationController, DEFAULT_SYSTEM_PROMPT};
pub use quick_action::QuickAction;
pub use session_store::SessionStore;
pub use usecase::ChatUsecase;
