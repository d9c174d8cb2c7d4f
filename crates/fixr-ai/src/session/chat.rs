//! Text sends.

use fixr_common::new_correlation_id;
use tracing::{debug, warn};

use crate::MessageKind;

use super::manager::Session;
use super::types::{PendingGuard, SendOutcome, SkipReason, TEXT_ERROR_TEXT, TEXT_FALLBACK_TEXT};

impl Session {
    /// Send a text message and fold the reply into the log.
    ///
    /// Blank input and calls made while another request is in flight are
    /// skipped without touching the log. Otherwise exactly one user message
    /// and one assistant message are appended, in that order.
    pub async fn send_text(&self, input: &str) -> SendOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SendOutcome::Skipped(SkipReason::EmptyInput);
        }

        let Some((guard, _)) = PendingGuard::begin(self, text.to_string(), TEXT_ERROR_TEXT) else {
            debug!("send_text ignored: request already in flight");
            return SendOutcome::Skipped(SkipReason::Busy);
        };
        self.lock_state().draft.clear();

        let thread_id = self.thread_id();
        let request = new_correlation_id();
        debug!(%request, thread = %thread_id, "sending text");

        let result = self
            .call_transport(|| self.transport.post_text(&thread_id, text))
            .await;

        match result {
            Ok(reply) => {
                debug!(%request, "text reply received");
                self.adopt_thread_id(reply.thread_id);
                let text = reply
                    .reply
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| TEXT_FALLBACK_TEXT.to_string());
                SendOutcome::Answered(guard.finish(text, MessageKind::Plain))
            }
            Err(e) => {
                warn!(%request, error = %e, "text request failed");
                let text = e
                    .detail()
                    .map(String::from)
                    .unwrap_or_else(|| TEXT_ERROR_TEXT.to_string());
                SendOutcome::Failed(guard.finish(text, MessageKind::Plain))
            }
        }
    }

    /// Send whatever is in the input buffer.
    pub async fn send_draft(&self) -> SendOutcome {
        let draft = self.draft();
        self.send_text(&draft).await
    }
}
