//! Image uploads.

use fixr_common::new_correlation_id;
use tracing::{debug, warn};

use crate::{ImageHandle, MessageKind, TransportError};

use super::manager::Session;
use super::types::{
    PendingGuard, SendOutcome, SkipReason, IMAGE_ERROR_TEXT, IMAGE_FALLBACK_TEXT,
};

impl Session {
    /// Upload an image for diagnosis and fold the analysis into the log.
    ///
    /// The user message is a placeholder naming the file; a successful
    /// analysis is appended as a `Diagnosis` message.
    pub async fn send_image(&self, image: ImageHandle) -> SendOutcome {
        let placeholder = format!("Uploading {}...", image.display_name());
        let Some((guard, _)) = PendingGuard::begin(self, placeholder, IMAGE_ERROR_TEXT) else {
            debug!("send_image ignored: request already in flight");
            return SendOutcome::Skipped(SkipReason::Busy);
        };

        let thread_id = self.thread_id();
        let request = new_correlation_id();
        debug!(%request, thread = %thread_id, image = image.display_name(), "uploading image");

        // The read counts against the request timeout.
        let (image_ref, thread) = (&image, thread_id.as_str());
        let result = self
            .call_transport(|| async move {
                let bytes = image_ref
                    .read()
                    .await
                    .map_err(|e| TransportError::Io(e.to_string()))?;
                self.transport
                    .post_image(thread, bytes, image_ref.display_name(), None)
                    .await
            })
            .await;

        match result {
            Ok(reply) => {
                debug!(%request, "image analysis received");
                self.adopt_thread_id(reply.thread_id);
                let text = reply
                    .reply
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| IMAGE_FALLBACK_TEXT.to_string());
                SendOutcome::Answered(guard.finish(text, MessageKind::Diagnosis))
            }
            Err(e) => {
                warn!(%request, error = %e, "image upload failed");
                let text = e
                    .detail()
                    .map(String::from)
                    .unwrap_or_else(|| IMAGE_ERROR_TEXT.to_string());
                SendOutcome::Failed(guard.finish(text, MessageKind::Plain))
            }
        }
    }
}
