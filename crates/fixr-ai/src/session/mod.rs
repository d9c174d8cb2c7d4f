//! Conversation session management.
//!
//! A `Session` owns the message log, the pending flag, and the
//! server-assigned thread id. It sends at most one request at a time and
//! folds exactly one assistant message back into the log per request.

mod chat;
mod events;
mod manager;
mod types;
mod upload;


pub use events::SessionEvent;
pub use manager::Session;
pub use types::{
    SendOutcome, SkipReason, IMAGE_ERROR_TEXT, IMAGE_FALLBACK_TEXT, TEXT_ERROR_TEXT,
    TEXT_FALLBACK_TEXT,
};
