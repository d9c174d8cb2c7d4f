//! Session outcomes, fixed reply texts, and the pending guard.

use std::sync::atomic::Ordering;

use tracing::warn;

use crate::{Message, MessageKind, Sender};

use super::events::SessionEvent;
use super::manager::Session;

pub(crate) const DEFAULT_GREETING: &str = "Hello! I'm your AI assistant. I can help diagnose \
problems, provide repair guidance, and connect you with the right professionals. How can I help \
you today?";

/// Reply shown when a chat response has no reply text.
pub const TEXT_FALLBACK_TEXT: &str = "Sorry, I couldn't process your request.";
/// Reply shown when a chat request fails without a backend detail.
pub const TEXT_ERROR_TEXT: &str =
    "Sorry, there was an error processing your message. Please try again.";
/// Reply shown when an image analysis has no reply text.
pub const IMAGE_FALLBACK_TEXT: &str = "Sorry, I couldn't analyze the image.";
/// Reply shown when an image upload fails without a backend detail.
pub const IMAGE_ERROR_TEXT: &str =
    "Sorry, there was an error uploading your image. Please try again.";

/// Why a send did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Input was empty after trimming.
    EmptyInput,
    /// Another request is still in flight.
    Busy,
}

/// How a `send_text` / `send_image` call settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was appended and no request was issued.
    Skipped(SkipReason),
    /// The backend answered; carries the appended assistant message.
    Answered(Message),
    /// The request failed; carries the appended assistant error message.
    Failed(Message),
}

impl SendOutcome {
    /// The assistant message appended by this call, if any.
    pub fn message(&self) -> Option<&Message> {
        match self {
            SendOutcome::Answered(m) | SendOutcome::Failed(m) => Some(m),
            SendOutcome::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, SendOutcome::Skipped(_))
    }
}

/// Holds the session's pending flag for one request.
///
/// Created together with the user message; released only after exactly one
/// assistant message has been appended. If the request future is dropped
/// before `finish`, the guard appends `fallback` itself so the log still
/// gets its assistant message.
pub(crate) struct PendingGuard<'a> {
    session: &'a Session,
    fallback: &'static str,
    finished: bool,
}

impl<'a> PendingGuard<'a> {
    /// Mark the session pending and append the user message. Returns `None`
    /// if a request is already in flight.
    pub(crate) fn begin(
        session: &'a Session,
        user_text: String,
        fallback: &'static str,
    ) -> Option<(Self, Message)> {
        let user_message = {
            let mut state = session.lock_state();
            if session
                .pending
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return None;
            }
            state.push(Sender::User, user_text, MessageKind::Plain)
        };

        session.publish(SessionEvent::MessageAppended(user_message.clone()));
        session.publish(SessionEvent::PendingChanged(true));
        Some((
            Self {
                session,
                fallback,
                finished: false,
            },
            user_message,
        ))
    }

    /// Append the assistant message and clear the pending flag.
    pub(crate) fn finish(mut self, text: String, kind: MessageKind) -> Message {
        self.finished = true;
        self.settle(text, kind)
    }

    fn settle(&self, text: String, kind: MessageKind) -> Message {
        let message = {
            let mut state = self.session.lock_state();
            let message = state.push(Sender::Assistant, text, kind);
            self.session.pending.store(false, Ordering::Release);
            message
        };
        self.session
            .publish(SessionEvent::MessageAppended(message.clone()));
        self.session.publish(SessionEvent::PendingChanged(false));
        message
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("request dropped before it settled");
            self.settle(self.fallback.to_string(), MessageKind::Plain);
        }
    }
}
